use sdk::{cosmwasm_std::Storage, cw_storage_plus::Item};

use crate::{ContractError, ContractResult};

const OPEN_LOANS: Item<'static, u64> = Item::new("open_loans");

pub const MAX_OPEN_LOANS: u64 = 1000;

pub fn load(storage: &dyn Storage) -> ContractResult<u64> {
    OPEN_LOANS
        .may_load(storage)
        .map(Option::unwrap_or_default)
        .map_err(Into::into)
}

/// Bumps the open-loan count, refusing new loans once the cap is behind us.
pub fn try_increment(storage: &mut dyn Storage) -> ContractResult<u64> {
    let next = load(storage)? + 1;
    if next > MAX_OPEN_LOANS + 1 {
        return Err(ContractError::CapacityExceeded {});
    }
    OPEN_LOANS.save(storage, &next)?;
    Ok(next)
}

/// Bumps the count unconditionally. Used when a settlement failure turns a
/// closed loan's payout into a recoverable record.
pub fn increment(storage: &mut dyn Storage) -> ContractResult<u64> {
    let next = load(storage)? + 1;
    OPEN_LOANS.save(storage, &next)?;
    Ok(next)
}

pub fn decrement(storage: &mut dyn Storage) -> ContractResult<u64> {
    let next = load(storage)?.saturating_sub(1);
    OPEN_LOANS.save(storage, &next)?;
    Ok(next)
}

use finance::coin::Coin;
use sdk::{cosmwasm_std::Storage, cw_storage_plus::Item};

use crate::{ContractError, ContractResult};

const FEE_POOL: Item<'static, Coin> = Item::new("fee_pool");

/// Collected fees below this floor are not netted against outgoing fees.
pub const NET_FLOOR: Coin = Coin::new(10_000_000);

pub fn load(storage: &dyn Storage) -> ContractResult<Coin> {
    FEE_POOL
        .may_load(storage)
        .map(Option::unwrap_or_default)
        .map_err(Into::into)
}

pub fn add(storage: &mut dyn Storage, amount: Coin) -> ContractResult<Coin> {
    let total = load(storage)?
        .checked_add(amount)
        .ok_or(ContractError::AmountOutOfRange {})?;
    FEE_POOL.save(storage, &total)?;
    Ok(total)
}

/// Nets an outgoing fee against the pool. Returns whether the pool covered
/// it, leaving the pool untouched while it sits at or below the floor.
pub fn try_net(storage: &mut dyn Storage, fee: Coin) -> ContractResult<bool> {
    let pool = load(storage)?;
    if pool <= NET_FLOOR {
        return Ok(false);
    }
    FEE_POOL.save(storage, &pool.saturating_sub(fee))?;
    Ok(true)
}

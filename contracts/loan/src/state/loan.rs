use serde::{Deserialize, Serialize};

use currency::Slot;
use finance::{coin::Coin, rate::Rate};
use sdk::{
    cosmwasm_std::{Addr, Env, Storage, Timestamp},
    cw_storage_plus::{Item, Map},
    schemars::{self, JsonSchema},
};

use crate::{ContractError, ContractResult};

use super::RecordId;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Borrower,
    Lender,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// Offered, awaiting a counterparty.
    Waiting,
    /// Taken, principal disbursed, awaiting repayment or expiry.
    Running,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct LoanRecord {
    pub state: State,
    pub maker_role: Role,
    pub loan_currency: Slot,
    pub collateral_currency: Slot,
    pub loan_period_days: u32,
    pub interest_rate: Rate,
    pub loan_amount: Coin,
    pub collateral_amount: Coin,
    pub interest: Coin,
    /// While waiting, when the offer lapses. Once running, when the
    /// collateral may be claimed.
    pub expiry: Timestamp,
    pub maker: Addr,
    pub taker: Option<Addr>,
}

impl LoanRecord {
    const STORAGE: Map<'static, Vec<u8>, Self> = Map::new("loans");
    const SEQ: Item<'static, u64> = Item::new("loan_seq");

    /// Derives the key of a new loan, unique even across offers opened in
    /// the same block.
    pub fn allocate_id(storage: &mut dyn Storage, env: &Env) -> ContractResult<RecordId> {
        let seq = Self::SEQ.may_load(storage)?.unwrap_or_default();
        Self::SEQ.save(storage, &(seq + 1))?;

        let id = RecordId::loan(env, seq);
        if Self::STORAGE.has(storage, id.to_vec()) {
            return Err(ContractError::IdOccupied {});
        }
        Ok(id)
    }

    pub fn load(storage: &dyn Storage, id: RecordId) -> ContractResult<Self> {
        Self::STORAGE
            .may_load(storage, id.to_vec())?
            .ok_or(ContractError::LoanNotFound {})
    }

    pub fn query(storage: &dyn Storage, id: RecordId) -> ContractResult<Option<Self>> {
        Self::STORAGE.may_load(storage, id.to_vec()).map_err(Into::into)
    }

    pub fn save(&self, storage: &mut dyn Storage, id: RecordId) -> ContractResult<()> {
        Self::STORAGE
            .save(storage, id.to_vec(), self)
            .map_err(Into::into)
    }

    pub fn remove(storage: &mut dyn Storage, id: RecordId) {
        Self::STORAGE.remove(storage, id.to_vec());
    }

    /// The funds the maker escrowed at creation.
    pub fn maker_posted(&self) -> (Slot, Coin) {
        match self.maker_role {
            Role::Borrower => (self.collateral_currency, self.collateral_amount),
            Role::Lender => (self.loan_currency, self.loan_amount),
        }
    }

    /// The funds a counterparty has to post to take the offer.
    pub fn taker_required(&self) -> (Slot, Coin) {
        match self.maker_role {
            Role::Borrower => (self.loan_currency, self.loan_amount),
            Role::Lender => (self.collateral_currency, self.collateral_amount),
        }
    }

    pub fn borrower(&self) -> &Addr {
        self.side(Role::Borrower)
    }

    pub fn lender(&self) -> &Addr {
        self.side(Role::Lender)
    }

    fn side(&self, role: Role) -> &Addr {
        if self.maker_role == role {
            &self.maker
        } else {
            self.taker
                .as_ref()
                .unwrap_or(&self.maker)
        }
    }
}

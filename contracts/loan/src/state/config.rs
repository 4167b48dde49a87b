use serde::{Deserialize, Serialize};

use finance::coin::Coin;
use sdk::{
    cosmwasm_std::{Addr, Api, Storage},
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::{msg::InstantiateMsg, ContractError, ContractResult};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Config {
    pub earnings_account: Addr,
    pub issuers: Vec<Addr>,
    pub transfer_cost: Coin,
}

impl Config {
    const STORAGE: Item<'static, Self> = Item::new("config");

    /// One issuer per non-native currency slot.
    const ISSUERS: usize = currency::MAX_CURRENCIES - 1;

    pub fn new(api: &dyn Api, msg: InstantiateMsg) -> ContractResult<Self> {
        if msg.issuers.len() != Self::ISSUERS {
            return Err(ContractError::IssuersLen {});
        }

        Ok(Self {
            earnings_account: api.addr_validate(&msg.earnings_account)?,
            issuers: msg
                .issuers
                .iter()
                .map(|issuer| api.addr_validate(issuer))
                .collect::<Result<_, _>>()?,
            transfer_cost: msg.transfer_cost,
        })
    }

    pub fn store(&self, storage: &mut dyn Storage) -> ContractResult<()> {
        Self::STORAGE.save(storage, self).map_err(Into::into)
    }

    pub fn load(storage: &dyn Storage) -> ContractResult<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }
}

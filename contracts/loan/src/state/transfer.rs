use serde::{Deserialize, Serialize};

use currency::Slot;
use finance::coin::Coin;
use sdk::{
    cosmwasm_std::{Addr, Env, Storage},
    cw_storage_plus::{Item, Map},
    schemars::{self, JsonSchema},
};

use crate::{ContractError, ContractResult};

use super::RecordId;

/// An outgoing payout, kept around until its delivery settles.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Transfer {
    pub destination: Addr,
    pub slot: Slot,
    pub amount: Coin,
}

const PENDING: Map<'static, u64, Transfer> = Map::new("pending_transfers");
const REPLY_SEQ: Item<'static, u64> = Item::new("reply_seq");

const FAILED: Map<'static, Vec<u8>, Transfer> = Map::new("failed_transfers");
const FAILED_NONCE: Item<'static, u64> = Item::new("failed_nonce");

impl Transfer {
    /// Registers the transfer for settlement tracking, handing back the
    /// reply id its delivery report will arrive under.
    pub fn schedule(&self, storage: &mut dyn Storage) -> ContractResult<u64> {
        let id = REPLY_SEQ.may_load(storage)?.unwrap_or_default();
        REPLY_SEQ.save(storage, &(id + 1))?;
        PENDING.save(storage, id, self)?;
        Ok(id)
    }

    /// Takes the transfer a delivery report refers to out of tracking.
    pub fn settle(storage: &mut dyn Storage, reply_id: u64) -> ContractResult<Self> {
        let transfer = PENDING
            .may_load(storage, reply_id)?
            .ok_or(ContractError::UnknownReply(reply_id))?;
        PENDING.remove(storage, reply_id);
        Ok(transfer)
    }

    /// Parks an undelivered transfer under a fresh recovery key.
    pub fn file(&self, storage: &mut dyn Storage, env: &Env) -> ContractResult<RecordId> {
        let nonce = FAILED_NONCE.may_load(storage)?.unwrap_or_default();
        FAILED_NONCE.save(storage, &(nonce + 1))?;

        let key = RecordId::nonce(env, nonce);
        FAILED.save(storage, key.to_vec(), self)?;
        Ok(key)
    }

    pub fn drain(storage: &mut dyn Storage, key: RecordId) -> ContractResult<Self> {
        let transfer = FAILED
            .may_load(storage, key.to_vec())?
            .ok_or(ContractError::LoanNotFound {})?;
        FAILED.remove(storage, key.to_vec());
        Ok(transfer)
    }
}

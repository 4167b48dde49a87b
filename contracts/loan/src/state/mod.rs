use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::Env,
    schemars::{self, JsonSchema},
};

pub mod config;
pub mod counters;
pub mod fees;
pub mod loan;
pub mod transfer;

/// A 32-byte record key, rendered as 64 uppercase hex chars.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub struct RecordId([u8; Self::LEN]);

impl RecordId {
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// The key of a freshly opened loan: the block time and the position of
    /// the triggering payment within the block, made collision-free within a
    /// block by a persistent allocation sequence.
    pub fn loan(env: &Env, seq: u64) -> Self {
        let tx_index = env.transaction.as_ref().map_or(0, |tx| tx.index);

        let mut bytes = [0u8; Self::LEN];
        bytes[..8].copy_from_slice(&env.block.time.seconds().to_be_bytes());
        bytes[8..12].copy_from_slice(&tx_index.to_be_bytes());
        bytes[12..20].copy_from_slice(&seq.to_be_bytes());
        Self(bytes)
    }

    /// The recovery key of a transfer parked after a failed delivery.
    pub fn nonce(env: &Env, nonce: u64) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes[..8].copy_from_slice(&env.block.time.nanos().to_be_bytes());
        bytes[8..16].copy_from_slice(&env.block.height.to_be_bytes());
        bytes[16..24].copy_from_slice(&nonce.to_be_bytes());
        Self(bytes)
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|byte| write!(f, "{byte:02X}"))
    }
}

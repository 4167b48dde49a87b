//! The fixed table of assets the loan market settles in.
//!
//! Slot 0 is the chain's native asset.  Every other slot is an issued asset
//! bound to exactly one issuer account, settled as a factory denom of that
//! issuer.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::Addr,
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

pub mod error;

pub type SymbolStatic = &'static str;

pub const MAX_CURRENCIES: usize = 6;

/// The assets the market supports, native first.  The slot order is part of
/// the wire format and must never change.
const TABLE: [Definition; MAX_CURRENCIES] = [
    Definition::new("NOM", "unom"),
    Definition::new("GBP", "ugbp"),
    Definition::new("EUR", "ueur"),
    Definition::new("USD", "uusd"),
    Definition::new("CHF", "uchf"),
    Definition::new("CNH", "ucnh"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Definition {
    ticker: SymbolStatic,
    subdenom: SymbolStatic,
}

impl Definition {
    const fn new(ticker: SymbolStatic, subdenom: SymbolStatic) -> Self {
        Self { ticker, subdenom }
    }

    pub const fn ticker(&self) -> SymbolStatic {
        self.ticker
    }

    /// The settlement representation of an amount of this asset.
    ///
    /// The native asset is a plain bank denom; issued assets are factory
    /// denoms of their issuer account.
    pub fn bank_denom(&self, issuer: Option<&Addr>) -> String {
        match issuer {
            None => self.subdenom.into(),
            Some(issuer) => format!("factory/{issuer}/{subdenom}", subdenom = self.subdenom),
        }
    }
}

/// An index into the currency table, checked to be in range on construction
/// and deserialization.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub const NATIVE: Slot = Slot(0);

    pub fn new(index: u8) -> Result<Self> {
        if usize::from(index) < MAX_CURRENCIES {
            Ok(Self(index))
        } else {
            Err(Error::SlotOutOfRange(index))
        }
    }

    pub const fn is_native(&self) -> bool {
        self.0 == Self::NATIVE.0
    }

    pub fn def(&self) -> &'static Definition {
        &TABLE[usize::from(self.0)]
    }

    /// The issuer bound to this slot, picked out of the per-market issuer
    /// accounts covering slots 1 to [`MAX_CURRENCIES`] - 1.
    pub fn issuer<'a>(&self, issuers: &'a [Addr]) -> Option<&'a Addr> {
        debug_assert_eq!(issuers.len(), MAX_CURRENCIES - 1);

        if self.is_native() {
            None
        } else {
            issuers.get(usize::from(self.0) - 1)
        }
    }

    pub fn bank_denom(&self, issuers: &[Addr]) -> String {
        self.def().bank_denom(self.issuer(issuers))
    }
}

impl TryFrom<u8> for Slot {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.def().ticker())
    }
}

/// Resolves a settlement denom back to its table slot, scanning the fixed
/// table once.
pub fn resolve(denom: &str, issuers: &[Addr]) -> Result<Slot> {
    (0..MAX_CURRENCIES)
        .map(|index| Slot(index as u8))
        .find(|slot| slot.bank_denom(issuers) == denom)
        .ok_or_else(|| Error::UnsupportedDenom(denom.into()))
}

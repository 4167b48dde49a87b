use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::schemars::{self, JsonSchema};

pub type Units = u32;

/// An annual interest rate expressed in thousandths of a percent,
/// e.g. 12345 reads as 12.345% per annum.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[schemars(transparent)]
pub struct Rate(Units);

impl Rate {
    /// The scale turning rate units into a plain fraction: units per 100%.
    pub const UNITS_IN_WHOLE: Units = 100_000;

    pub const fn from_units(units: Units) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> Units {
        self.0
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let whole = self.0 / 1000;
        let frac = self.0 % 1000;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{}%", format!("{frac:0>3}").trim_end_matches('0'))
        }
    }
}

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    iter::Sum,
};

use serde::{
    de::{Unexpected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use sdk::{
    cosmwasm_std::Uint128,
    schemars::{self, JsonSchema},
};

pub type Amount = u128;

/// The number of implied decimals of every externally visible amount.
pub const DECIMALS: u32 = 6;

const SCALE: Amount = (10 as Amount).pow(DECIMALS);

/// A fixed-point amount scaled by 10^6.
///
/// Serialized as a string to survive JSON number precision limits, the same
/// way the host SDK treats its 128-bit integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, JsonSchema)]
#[schemars(transparent)]
pub struct Coin(Amount);

impl Coin {
    pub const ZERO: Self = Self(0);

    pub const fn new(amount: Amount) -> Self {
        Self(amount)
    }

    pub const fn amount(&self) -> Amount {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_mul(self, rhs: Amount) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    pub fn checked_div(self, rhs: Amount) -> Option<Self> {
        self.0.checked_div(rhs).map(Self)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<Coin> for Uint128 {
    fn from(coin: Coin) -> Self {
        Uint128::new(coin.0)
    }
}

impl From<Uint128> for Coin {
    fn from(amount: Uint128) -> Self {
        Self(amount.u128())
    }
}

impl Sum for Coin {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::ZERO, |acc, coin| {
            acc.checked_add(coin).expect("amount overflow on summation")
        })
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let rendered = format!("{frac:0>width$}", width = DECIMALS as usize);
            write!(f, "{whole}.{}", rendered.trim_end_matches('0'))
        }
    }
}

impl Serialize for Coin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Coin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StrVisitor();

        impl<'de> Visitor<'de> for StrVisitor {
            type Value = Coin;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
                formatter.write_str("\"<u128>\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                str::parse(v)
                    .map(Coin)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(StrVisitor())
    }
}

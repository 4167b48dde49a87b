use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::Add,
};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::Timestamp,
    schemars::{self, JsonSchema},
};

pub type Units = u64;

/// A timespan between two ledger timestamps, in nanoseconds.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize, JsonSchema,
)]
#[schemars(transparent)]
pub struct Duration(Units);

impl Duration {
    const UNITS_IN_SECOND: Units = 1000 * 1000 * 1000;
    const SECONDS_IN_DAY: Units = 60 * 60 * 24;

    pub const YEAR: Duration = Self::from_days(365);

    pub const fn from_nanos(nanos: Units) -> Self {
        Self(nanos)
    }

    pub const fn from_secs(secs: u32) -> Self {
        Self::from_nanos(secs as Units * Self::UNITS_IN_SECOND)
    }

    pub const fn from_days(days: u32) -> Self {
        Self::from_nanos(days as Units * Self::SECONDS_IN_DAY * Self::UNITS_IN_SECOND)
    }

    #[track_caller]
    pub fn between(start: &Timestamp, end: &Timestamp) -> Self {
        debug_assert!(start <= end);

        Self(end.nanos() - start.nanos())
    }

    pub const fn nanos(&self) -> Units {
        self.0
    }

    pub const fn secs(&self) -> Units {
        self.0 / Self::UNITS_IN_SECOND
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    #[track_caller]
    fn add(self, rhs: Duration) -> Self::Output {
        Timestamp::from_nanos(
            self.nanos()
                .checked_add(rhs.nanos())
                .expect("timestamp overflow on duration addition"),
        )
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}s", self.secs())
    }
}

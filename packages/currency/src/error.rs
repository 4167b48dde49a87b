use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Currency] Slot {0} is beyond the supported currencies")]
    SlotOutOfRange(u8),

    #[error("[Currency] The denom '{0}' does not settle any supported currency")]
    UnsupportedDenom(String),
}

pub type Result<T> = core::result::Result<T, Error>;

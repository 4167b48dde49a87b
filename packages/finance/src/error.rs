use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Finance] Fixed-point overflow when evaluating `{details}`")]
    Overflow { details: String },
}

impl Error {
    pub fn overflow(details: impl Into<String>) -> Self {
        Self::Overflow {
            details: details.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

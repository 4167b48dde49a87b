use std::fmt::Debug;

use thiserror::Error;

use sdk::cosmwasm_std::{Api, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Platform] Expecting funds consisting of a single coin")]
    UnexpectedFunds(),

    #[error("[Platform] {0}")]
    Currency(#[from] currency::error::Error),

    #[error("[Platform] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Platform] [Std] An error occured on data serialization: {0}")]
    Serialization(StdError),
}

pub fn log<Err>(api: &dyn Api) -> impl FnOnce(&Err) + '_
where
    Err: Debug,
{
    |err| api.debug(&format!("{err:?}"))
}

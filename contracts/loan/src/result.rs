use crate::error::ContractError;

pub type ContractResult<T> = core::result::Result<T, ContractError>;

pub mod contract;
mod error;
pub mod memo;
pub mod msg;
mod result;
pub mod state;
pub mod underwriting;

pub use crate::{error::ContractError, result::ContractResult};

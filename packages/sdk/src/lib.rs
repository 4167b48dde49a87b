pub use cosmwasm_schema::{self, schemars};
pub use cosmwasm_std;
#[cfg(all(not(target_arch = "wasm32"), feature = "testing"))]
pub use cw_multi_test;
pub use cw_storage_plus;

pub mod cosmwasm_ext;

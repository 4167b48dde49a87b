use serde::{Deserialize, Serialize};

use finance::coin::Coin;
use sdk::{
    cosmwasm_std::Addr,
    schemars::{self, JsonSchema},
};

use crate::state::loan::LoanRecord;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct InstantiateMsg {
    /// The protocol's earnings account, receiver of the make fee.
    pub earnings_account: String,
    /// Issuer accounts bound to currency slots 1 onwards, in slot order.
    pub issuers: Vec<String>,
    /// The network cost booked into the fee pool per settled transfer.
    pub transfer_cost: Coin,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// An incoming payment carrying an encoded instruction.
    Apply { memo: Memo },
}

/// The structured annotation attached to an incoming payment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Memo {
    pub format: String,
    pub memo_type: String,
    pub data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    /// The loan under the given 64-char uppercase-hex id, if any.
    Loan { id: String },
    OpenLoans {},
    FeePool {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ConfigResponse {
    pub earnings_account: Addr,
    pub issuers: Vec<Addr>,
    pub transfer_cost: Coin,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct LoanResponse(pub Option<LoanRecord>);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct OpenLoansResponse(pub u64);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct FeePoolResponse(pub Coin);

/// The query every issuer account answers about the credit relationship a
/// holder has established for one of its assets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum CreditLineQuery {
    CreditLine { account: Addr, ticker: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct CreditLineResponse {
    /// The holder's limit, `None` when no credit line is set.
    pub limit: Option<Coin>,
}

use thiserror::Error;

use sdk::cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("[Loan] [Std] {0}")]
    Std(#[from] StdError),

    #[error("[Loan] {0}")]
    Currency(#[from] currency::error::Error),

    #[error("[Loan] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Loan] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Loan] Expecting one issuer account per issued currency")]
    IssuersLen {},

    #[error("[Loan] The memo does not carry a plain-text instruction")]
    MalformedMemo {},

    #[error("[Loan] Invalid action")]
    InvalidAction {},

    #[error("[Loan] Invalid instruction length")]
    InvalidLength {},

    #[error("[Loan] Invalid role")]
    InvalidRole {},

    #[error("[Loan] Currency out of range")]
    CurrencyOutOfRange {},

    #[error("[Loan] Amount out of range")]
    AmountOutOfRange {},

    #[error("[Loan] Interest rate out of range")]
    InterestOutOfRange {},

    #[error("[Loan] The interest over the loan period exceeds the cap")]
    InterestCapExceeded {},

    #[error("[Loan] No credit line set towards the issuer of '{0}'")]
    TrustlineMissing(String),

    #[error("[Loan] The credit line for '{0}' is below the posted amount")]
    TrustlineInsufficient(String),

    #[error("[Loan] Not enough funds sent")]
    InsufficientFunds {},

    #[error("[Loan] The loan does not exist")]
    LoanNotFound {},

    #[error("[Loan] A loan already exists under the derived id")]
    IdOccupied {},

    #[error("[Loan] The loan is not in the expected state")]
    LoanWrongState {},

    #[error("[Loan] Not authorized")]
    NotAuthorized {},

    #[error("[Loan] Wrong currency sent")]
    WrongCurrencySent {},

    #[error("[Loan] No new loans are accepted")]
    CapacityExceeded {},

    #[error("[Loan] Unknown settlement reply id {0}")]
    UnknownReply(u64),
}

use currency::Slot;
use finance::coin::Coin;
use platform::{bank, error as platform_error, response};
use sdk::{
    cosmwasm_ext::Response as CwResponse,
    cosmwasm_std::{
        entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Reply,
    },
};

use crate::{
    memo,
    msg::{
        ConfigResponse, ExecuteMsg, FeePoolResponse, InstantiateMsg, LoanResponse,
        OpenLoansResponse, QueryMsg,
    },
    state::{config::Config, counters, fees, loan::LoanRecord},
    ContractError, ContractResult,
};

mod exec;
mod reconcile;
mod transfers;

#[entry_point]
pub fn instantiate(
    deps: DepsMut<'_>,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> ContractResult<CwResponse> {
    Config::new(deps.api, msg)
        .and_then(|config| config.store(deps.storage))
        .map(|()| response::empty_response())
        .inspect_err(platform_error::log(deps.api))
}

#[entry_point]
pub fn execute(
    deps: DepsMut<'_>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> ContractResult<CwResponse> {
    let ExecuteMsg::Apply { memo } = msg;

    let api = deps.api;
    Config::load(deps.storage)
        .and_then(|config| {
            let payment = payment(info, &config)?;
            let instruction = memo::decode(&memo)?;
            exec::apply(deps, &env, &config, payment, instruction)
        })
        .map(response::response_only_messages)
        .inspect_err(platform_error::log(api))
}

#[entry_point]
pub fn reply(deps: DepsMut<'_>, env: Env, msg: Reply) -> ContractResult<CwResponse> {
    reconcile::settle(deps.storage, &env, msg)
        .map(response::response_only_messages)
        .inspect_err(platform_error::log(deps.api))
}

#[entry_point]
pub fn query(deps: Deps<'_>, _env: Env, msg: QueryMsg) -> ContractResult<Binary> {
    match msg {
        QueryMsg::Config {} => Config::load(deps.storage).and_then(|config| {
            to_json_binary(&ConfigResponse {
                earnings_account: config.earnings_account,
                issuers: config.issuers,
                transfer_cost: config.transfer_cost,
            })
            .map_err(Into::into)
        }),
        QueryMsg::Loan { id } => memo::decode_id(id.as_bytes())
            .and_then(|id| LoanRecord::query(deps.storage, id))
            .and_then(|record| to_json_binary(&LoanResponse(record)).map_err(Into::into)),
        QueryMsg::OpenLoans {} => counters::load(deps.storage)
            .and_then(|count| to_json_binary(&OpenLoansResponse(count)).map_err(Into::into)),
        QueryMsg::FeePool {} => fees::load(deps.storage)
            .and_then(|pool| to_json_binary(&FeePoolResponse(pool)).map_err(Into::into)),
    }
    .inspect_err(platform_error::log(deps.api))
}

/// The triggering payment, reduced to the asset table.
#[cfg_attr(any(debug_assertions, test), derive(Debug))]
pub(crate) struct Payment {
    pub sender: Addr,
    pub slot: Slot,
    pub amount: Coin,
}

fn payment(info: MessageInfo, config: &Config) -> ContractResult<Payment> {
    let coin = bank::received_one(info.funds)?;

    let slot = currency::resolve(&coin.denom, &config.issuers)
        .map_err(|_| ContractError::WrongCurrencySent {})?;

    Ok(Payment {
        sender: info.sender,
        slot,
        amount: coin.amount.into(),
    })
}

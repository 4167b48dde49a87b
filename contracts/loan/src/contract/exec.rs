//! The per-action state transitions driven by decoded instructions.

use finance::{coin::Coin, duration::Duration};
use platform::{
    batch::Batch,
    emit::{Emit, Emitter},
    message::Response as MessageResponse,
};
use sdk::cosmwasm_std::{DepsMut, Env};

use crate::{
    memo::{Instruction, MakeTerms},
    state::{
        config::Config,
        counters, fees,
        loan::{LoanRecord, State},
        transfer::Transfer,
        RecordId,
    },
    underwriting::{self, IssuerQuerier},
    ContractError, ContractResult,
};

use super::{transfers, Payment};

/// Instructions that only address an existing record must not move real
/// value, their payment stays with the contract.
const DUST_CAP: Coin = Coin::new(1_000_000);

/// How long an offer stays open for a counterparty.
const WAITING_PERIOD: Duration = Duration::from_days(31);

const EVENT_TYPE: &str = "loan";

pub(super) fn apply(
    deps: DepsMut<'_>,
    env: &Env,
    config: &Config,
    payment: Payment,
    instruction: Instruction,
) -> ContractResult<MessageResponse> {
    match instruction {
        Instruction::Make(terms) => make(deps, env, config, payment, &terms),
        Instruction::Cancel { id } => cancel(deps, env, config, payment, id),
        Instruction::Take { id } => take(deps, env, config, payment, id),
        Instruction::Repay { id } => repay(deps, config, payment, id),
        Instruction::Close { id } => close(deps, env, config, payment, id),
        Instruction::Resend { id } => resend(deps, config, payment, id),
    }
}

fn make(
    deps: DepsMut<'_>,
    env: &Env,
    config: &Config,
    payment: Payment,
    terms: &MakeTerms,
) -> ContractResult<MessageResponse> {
    let open = counters::try_increment(deps.storage)?;

    let vetted = underwriting::vet(
        terms,
        &payment.sender,
        payment.amount,
        &IssuerQuerier::new(deps.querier, &config.issuers),
    )?;
    let (posted_slot, _) = vetted.posted();
    let fee = vetted.fee;

    let id = LoanRecord::allocate_id(deps.storage, env)?;
    let record = LoanRecord {
        state: State::Waiting,
        maker_role: vetted.maker_role,
        loan_currency: vetted.loan_currency,
        collateral_currency: vetted.collateral_currency,
        loan_period_days: vetted.loan_period_days,
        interest_rate: vetted.interest_rate,
        loan_amount: vetted.loan_amount,
        collateral_amount: vetted.collateral_amount,
        interest: vetted.interest,
        expiry: env.block.time + WAITING_PERIOD,
        maker: payment.sender,
        taker: None,
    };
    record.save(deps.storage, id)?;

    let fee_netted = posted_slot.is_native() && fees::try_net(deps.storage, fee)?;
    let batch = if fee_netted {
        Batch::default()
    } else {
        transfers::emit(
            deps.storage,
            config,
            vec![Transfer {
                destination: config.earnings_account.clone(),
                slot: posted_slot,
                amount: fee,
            }],
        )?
    };

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "make")
            .emit_to_string_value("id", id)
            .emit_to_string_value("open", open),
    ))
}

fn cancel(
    deps: DepsMut<'_>,
    env: &Env,
    config: &Config,
    payment: Payment,
    id: RecordId,
) -> ContractResult<MessageResponse> {
    let record = LoanRecord::load(deps.storage, id)?;
    expect_state(&record, State::Waiting)?;
    dust_only(payment.amount)?;

    if payment.sender != record.maker && env.block.time < record.expiry {
        return Err(ContractError::NotAuthorized {});
    }

    let (slot, amount) = record.maker_posted();
    let batch = transfers::emit(
        deps.storage,
        config,
        vec![Transfer {
            destination: payment.sender,
            slot,
            amount,
        }],
    )?;

    LoanRecord::remove(deps.storage, id);
    let open = counters::decrement(deps.storage)?;

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "cancel")
            .emit_to_string_value("id", id)
            .emit_to_string_value("open", open),
    ))
}

fn take(
    deps: DepsMut<'_>,
    env: &Env,
    config: &Config,
    payment: Payment,
    id: RecordId,
) -> ContractResult<MessageResponse> {
    let mut record = LoanRecord::load(deps.storage, id)?;
    expect_state(&record, State::Waiting)?;

    if payment.sender == record.maker {
        return Err(ContractError::NotAuthorized {});
    }

    let (required_slot, required_amount) = record.taker_required();
    if payment.slot != required_slot {
        return Err(ContractError::WrongCurrencySent {});
    }
    if payment.amount < required_amount {
        return Err(ContractError::InsufficientFunds {});
    }

    record.taker = Some(payment.sender);
    record.state = State::Running;
    record.expiry = env.block.time + Duration::from_days(record.loan_period_days);

    let batch = transfers::emit(
        deps.storage,
        config,
        vec![Transfer {
            destination: record.borrower().clone(),
            slot: record.loan_currency,
            amount: record.loan_amount,
        }],
    )?;

    record.save(deps.storage, id)?;

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "take")
            .emit_to_string_value("id", id)
            .emit_to_string_value("expiry", record.expiry.seconds()),
    ))
}

fn repay(
    deps: DepsMut<'_>,
    config: &Config,
    payment: Payment,
    id: RecordId,
) -> ContractResult<MessageResponse> {
    let record = LoanRecord::load(deps.storage, id)?;
    expect_state(&record, State::Running)?;

    if &payment.sender != record.borrower() {
        return Err(ContractError::NotAuthorized {});
    }
    if payment.slot != record.loan_currency {
        return Err(ContractError::WrongCurrencySent {});
    }
    if payment.amount < record.loan_amount {
        return Err(ContractError::InsufficientFunds {});
    }

    let batch = transfers::emit(
        deps.storage,
        config,
        vec![
            Transfer {
                destination: record.borrower().clone(),
                slot: record.collateral_currency,
                amount: record.collateral_amount.saturating_sub(record.interest),
            },
            Transfer {
                destination: record.lender().clone(),
                slot: record.collateral_currency,
                amount: record.interest,
            },
            Transfer {
                destination: record.lender().clone(),
                slot: record.loan_currency,
                amount: record.loan_amount,
            },
        ],
    )?;

    LoanRecord::remove(deps.storage, id);
    let open = counters::decrement(deps.storage)?;

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "repay")
            .emit_to_string_value("id", id)
            .emit_to_string_value("open", open),
    ))
}

fn close(
    deps: DepsMut<'_>,
    env: &Env,
    config: &Config,
    payment: Payment,
    id: RecordId,
) -> ContractResult<MessageResponse> {
    let record = LoanRecord::load(deps.storage, id)?;
    expect_state(&record, State::Running)?;
    dust_only(payment.amount)?;

    if env.block.time < record.expiry {
        return Err(ContractError::NotAuthorized {});
    }

    let batch = transfers::emit(
        deps.storage,
        config,
        vec![Transfer {
            destination: record.lender().clone(),
            slot: record.collateral_currency,
            amount: record.collateral_amount,
        }],
    )?;

    LoanRecord::remove(deps.storage, id);
    let open = counters::decrement(deps.storage)?;

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "close")
            .emit_to_string_value("id", id)
            .emit_to_string_value("open", open),
    ))
}

fn resend(
    deps: DepsMut<'_>,
    config: &Config,
    payment: Payment,
    id: RecordId,
) -> ContractResult<MessageResponse> {
    dust_only(payment.amount)?;

    let parked = Transfer::drain(deps.storage, id)?;
    let batch = transfers::emit(deps.storage, config, vec![parked])?;
    let open = counters::decrement(deps.storage)?;

    Ok(MessageResponse::messages_with_event(
        batch,
        Emitter::of_type(EVENT_TYPE)
            .emit("action", "resend")
            .emit_to_string_value("id", id)
            .emit_to_string_value("open", open),
    ))
}

fn expect_state(record: &LoanRecord, expected: State) -> ContractResult<()> {
    if record.state != expected {
        return Err(ContractError::LoanWrongState {});
    }
    Ok(())
}

fn dust_only(amount: Coin) -> ContractResult<()> {
    if amount > DUST_CAP {
        return Err(ContractError::AmountOutOfRange {});
    }
    Ok(())
}

//! Settlement of outgoing transfers from their delivery reports.

use platform::{
    emit::{Emit, Emitter},
    message::Response as MessageResponse,
};
use sdk::cosmwasm_std::{Env, Reply, Storage, SubMsgResult};

use crate::{
    state::{config::Config, counters, fees, transfer::Transfer},
    ContractResult,
};

const EVENT_TYPE: &str = "loan-transfer";

/// A delivery failure never bounces back to the payment sender.  The payout
/// is parked under a recovery key instead and the key is surfaced through
/// the event for a later resend.
pub(super) fn settle(
    storage: &mut dyn Storage,
    env: &Env,
    msg: Reply,
) -> ContractResult<MessageResponse> {
    let transfer = Transfer::settle(storage, msg.id)?;

    let cost = Config::load(storage)?.transfer_cost;
    fees::add(storage, cost)?;

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Emitter::of_type(EVENT_TYPE)
            .emit("delivered", "success")
            .emit_to_string_value("to", &transfer.destination)
            .into()),
        SubMsgResult::Err(error) => {
            let key = transfer.file(storage, env)?;
            let open = counters::increment(storage)?;

            Ok(Emitter::of_type(EVENT_TYPE)
                .emit("delivered", "failure")
                .emit("error", error)
                .emit_to_string_value("recovery-key", key)
                .emit_to_string_value("open", open)
                .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use currency::Slot;
    use finance::coin::Coin;
    use sdk::cosmwasm_std::{
        testing::{mock_dependencies, mock_env, MockApi},
        Addr, Reply, SubMsgResponse, SubMsgResult,
    };

    use crate::{
        msg::InstantiateMsg,
        state::{config::Config, counters, fees, transfer::Transfer},
        ContractError,
    };

    const COST: u128 = 12;

    fn setup(deps: &mut sdk::cosmwasm_std::testing::MockStorage) -> Transfer {
        let config = Config::new(
            &MockApi::default(),
            InstantiateMsg {
                earnings_account: "earnings".into(),
                issuers: (1..6).map(|i| format!("issuer{i}")).collect(),
                transfer_cost: Coin::new(COST),
            },
        )
        .unwrap();
        config.store(deps).unwrap();

        let transfer = Transfer {
            destination: Addr::unchecked("dest"),
            slot: Slot::NATIVE,
            amount: Coin::new(500),
        };
        assert_eq!(transfer.schedule(deps).unwrap(), 0);
        transfer
    }

    fn delivered(id: u64) -> Reply {
        Reply {
            id,
            result: SubMsgResult::Ok(SubMsgResponse {
                events: vec![],
                data: None,
            }),
        }
    }

    fn bounced(id: u64) -> Reply {
        Reply {
            id,
            result: SubMsgResult::Err("insufficient funds".into()),
        }
    }

    #[test]
    fn success_books_the_cost() {
        let mut deps = mock_dependencies();
        setup(&mut deps.storage);

        super::settle(&mut deps.storage, &mock_env(), delivered(0)).unwrap();

        assert_eq!(fees::load(&deps.storage).unwrap(), Coin::new(COST));
        assert_eq!(counters::load(&deps.storage).unwrap(), 0);
        assert_eq!(
            Transfer::settle(&mut deps.storage, 0).unwrap_err(),
            ContractError::UnknownReply(0)
        );
    }

    #[test]
    fn failure_parks_the_payout() {
        let mut deps = mock_dependencies();
        let transfer = setup(&mut deps.storage);
        let env = mock_env();

        super::settle(&mut deps.storage, &env, bounced(0)).unwrap();

        assert_eq!(fees::load(&deps.storage).unwrap(), Coin::new(COST));
        assert_eq!(counters::load(&deps.storage).unwrap(), 1);

        let key = crate::state::RecordId::nonce(&env, 0);
        assert_eq!(
            Transfer::drain(&mut deps.storage, key).unwrap(),
            transfer
        );
    }

    #[test]
    fn unknown_report_rejected() {
        let mut deps = mock_dependencies();
        setup(&mut deps.storage);

        assert_eq!(
            super::settle(&mut deps.storage, &mock_env(), delivered(9)).unwrap_err(),
            ContractError::UnknownReply(9)
        );
    }
}

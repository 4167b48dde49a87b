use currency::Slot;
use finance::coin::Coin;
use sdk::cosmwasm_std::{Addr, BankMsg, Coin as CoinCw};

use crate::{error::Error, result::Result};

/// Unpacks the funds attached to a message, insisting on exactly one coin.
pub fn received_one(funds: Vec<CoinCw>) -> Result<CoinCw> {
    <[CoinCw; 1]>::try_from(funds)
        .map(|[coin]| coin)
        .map_err(|_| Error::UnexpectedFunds())
}

/// Builds the settlement message for one outgoing transfer, re-encoding the
/// amount into the asset's bank representation: the native denom for slot 0,
/// the issuer-bound factory denom otherwise.
pub fn send(to: &Addr, slot: Slot, amount: Coin, issuers: &[Addr]) -> BankMsg {
    debug_assert!(!amount.is_zero());

    BankMsg::Send {
        to_address: to.into(),
        amount: vec![CoinCw::new(amount.amount(), slot.bank_denom(issuers))],
    }
}

#[cfg(test)]
mod test {
    use currency::Slot;
    use finance::coin::Coin;
    use sdk::cosmwasm_std::{Addr, BankMsg, Coin as CoinCw};

    use crate::error::Error;

    #[test]
    fn one_coin_received() {
        assert_eq!(
            Ok(CoinCw::new(42, "unom")),
            super::received_one(vec![CoinCw::new(42, "unom")])
        );
    }

    #[test]
    fn no_coins_rejected() {
        assert_eq!(Err(Error::UnexpectedFunds()), super::received_one(vec![]));
    }

    #[test]
    fn extra_coins_rejected() {
        assert_eq!(
            Err(Error::UnexpectedFunds()),
            super::received_one(vec![CoinCw::new(1, "unom"), CoinCw::new(2, "ueur")])
        );
    }

    #[test]
    fn native_send() {
        let issuers: Vec<Addr> = (1..6).map(|i| Addr::unchecked(format!("i{i}"))).collect();
        let msg = super::send(
            &Addr::unchecked("dest"),
            Slot::NATIVE,
            Coin::new(42),
            &issuers,
        );
        assert_eq!(
            BankMsg::Send {
                to_address: "dest".into(),
                amount: vec![CoinCw::new(42, "unom")],
            },
            msg
        );
    }

    #[test]
    fn issued_send() {
        let issuers: Vec<Addr> = (1..6).map(|i| Addr::unchecked(format!("i{i}"))).collect();
        let msg = super::send(
            &Addr::unchecked("dest"),
            Slot::new(2).unwrap(),
            Coin::new(1000),
            &issuers,
        );
        assert_eq!(
            BankMsg::Send {
                to_address: "dest".into(),
                amount: vec![CoinCw::new(1000, "factory/i2/ueur")],
            },
            msg
        );
    }
}

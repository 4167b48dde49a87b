//! Fixed-point interest and protocol-fee arithmetic.

use std::cmp;

use crate::{
    coin::Coin,
    error::{Error, Result},
    rate::Rate,
};

const DAYS_IN_YEAR: u128 = 365;

/// One permille of the posted amount goes to the protocol.
pub const FEE_DIVISOR: u128 = 1000;

/// The floor of the protocol fee, in 6-decimal units (10 native).
pub const MIN_FEE: Coin = Coin::new(10_000_000);

/// The interest due over the whole loan period, computed once at creation:
/// `floor(days * rate * principal / 100_000 / 365)`.
pub fn accrued(period_days: u32, rate: Rate, principal: Coin) -> Result<Coin> {
    u128::from(period_days)
        .checked_mul(rate.units().into())
        .and_then(|units| principal.checked_mul(units))
        .and_then(|product| product.checked_div(Rate::UNITS_IN_WHOLE.into()))
        .and_then(|product| product.checked_div(DAYS_IN_YEAR))
        .ok_or_else(|| Error::overflow("days * rate * principal"))
}

/// The rate annualized over the loan period, in rate units; capped by the
/// underwriting rules.
pub fn annualized(rate: Rate, period_days: u32) -> u128 {
    u128::from(rate.units()) * u128::from(period_days) / DAYS_IN_YEAR
}

/// `max(MIN_FEE, posted / 1000)`.
pub fn fee(posted: Coin) -> Coin {
    cmp::max(MIN_FEE, Coin::new(posted.amount() / FEE_DIVISOR))
}

#[cfg(test)]
mod test {
    use crate::{coin::Coin, error::Error, rate::Rate};

    use super::MIN_FEE;

    #[test]
    fn accrued() {
        // 30 days at 12.345% on 10.0 collateral
        assert_eq!(
            Ok(Coin::new(30 * 12345 * 10_000_000 / 100_000 / 365)),
            super::accrued(30, Rate::from_units(12345), Coin::new(10_000_000))
        );
        assert_eq!(
            Ok(Coin::ZERO),
            super::accrued(1, Rate::from_units(1), Coin::new(1000))
        );
        assert_eq!(
            Err(Error::overflow("days * rate * principal")),
            super::accrued(u32::MAX, Rate::from_units(u32::MAX), Coin::new(u128::MAX))
        );
    }

    #[test]
    fn annualized() {
        assert_eq!(90000, super::annualized(Rate::from_units(90000), 365));
        assert!(super::annualized(Rate::from_units(99999), 9999) > 90000);
    }

    #[test]
    fn fee_floor() {
        assert_eq!(MIN_FEE, super::fee(Coin::new(1000)));
        assert_eq!(MIN_FEE, super::fee(Coin::new(10_000_000_000)));
        assert_eq!(
            Coin::new(10_000_001),
            super::fee(Coin::new(10_000_001_000))
        );
    }
}

//! Ordered vetting of loan offers before a record is opened.

use currency::Slot;
use finance::{
    coin::Coin,
    interest,
    rate::{Rate, Units},
};
use sdk::cosmwasm_std::{Addr, QuerierWrapper};

use crate::{
    memo::{MakeTerms, RawRole},
    msg::{CreditLineQuery, CreditLineResponse},
    state::loan::Role,
    ContractError, ContractResult,
};

const MAX_PERIOD_DAYS: u32 = 9999;
const MAX_RATE: Units = Rate::UNITS_IN_WHOLE - 1;

/// The annualized rate may not exceed 90% over the loan period.
const ANNUALIZED_CAP: u128 = 90_000;

const MIN_AMOUNT: Coin = Coin::new(1000);

/// The credit relationships a holder has established with the issuers.
pub trait CreditLines {
    fn limit(&self, holder: &Addr, slot: Slot) -> ContractResult<Option<Coin>>;
}

pub struct IssuerQuerier<'a> {
    querier: QuerierWrapper<'a>,
    issuers: &'a [Addr],
}

impl<'a> IssuerQuerier<'a> {
    pub fn new(querier: QuerierWrapper<'a>, issuers: &'a [Addr]) -> Self {
        Self { querier, issuers }
    }
}

impl CreditLines for IssuerQuerier<'_> {
    fn limit(&self, holder: &Addr, slot: Slot) -> ContractResult<Option<Coin>> {
        debug_assert!(!slot.is_native());

        let Some(issuer) = slot.issuer(self.issuers) else {
            return Ok(None);
        };
        self.querier
            .query_wasm_smart::<CreditLineResponse>(
                issuer,
                &CreditLineQuery::CreditLine {
                    account: holder.clone(),
                    ticker: slot.def().ticker().into(),
                },
            )
            .map(|response| response.limit)
            .map_err(Into::into)
    }
}

/// The outcome of a successful vetting, ready to be turned into a record.
#[derive(Debug, PartialEq, Eq)]
pub struct Vetted {
    pub maker_role: Role,
    pub loan_currency: Slot,
    pub collateral_currency: Slot,
    pub loan_period_days: u32,
    pub interest_rate: Rate,
    pub loan_amount: Coin,
    pub collateral_amount: Coin,
    pub interest: Coin,
    pub fee: Coin,
}

impl Vetted {
    /// The asset the offer maker escrows, the fee charged on top of it.
    pub fn posted(&self) -> (Slot, Coin) {
        match self.maker_role {
            Role::Borrower => (self.collateral_currency, self.collateral_amount),
            Role::Lender => (self.loan_currency, self.loan_amount),
        }
    }
}

pub fn vet<Lines>(
    terms: &MakeTerms,
    maker: &Addr,
    paid_in: Coin,
    lines: &Lines,
) -> ContractResult<Vetted>
where
    Lines: CreditLines,
{
    let loan_currency = slot(terms.loan_currency)?;
    let collateral_currency = slot(terms.collateral_currency)?;

    if !(1..=MAX_PERIOD_DAYS).contains(&terms.loan_period)
        || !(1..=MAX_RATE).contains(&terms.interest_rate)
    {
        return Err(ContractError::AmountOutOfRange {});
    }
    let interest_rate = Rate::from_units(terms.interest_rate);

    let loan_amount = amount(terms.loan_amount)?;
    let collateral_amount = amount(terms.collateral_amount)?;

    if interest::annualized(interest_rate, terms.loan_period) > ANNUALIZED_CAP {
        return Err(ContractError::InterestCapExceeded {});
    }

    let vetted = Vetted {
        maker_role: match terms.role {
            RawRole::Borrower => Role::Borrower,
            RawRole::Lender => Role::Lender,
        },
        loan_currency,
        collateral_currency,
        loan_period_days: terms.loan_period,
        interest_rate,
        loan_amount,
        collateral_amount,
        interest: interest::accrued(terms.loan_period, interest_rate, collateral_amount)?,
        fee: Coin::ZERO,
    };

    let (posted_slot, posted_amount) = vetted.posted();
    check_credit_line(maker, posted_slot, posted_amount, lines)?;

    let fee = interest::fee(posted_amount);
    posted_amount
        .checked_add(fee)
        .filter(|&required| paid_in >= required)
        .ok_or(ContractError::InsufficientFunds {})?;

    Ok(Vetted { fee, ..vetted })
}

fn slot(index: u8) -> ContractResult<Slot> {
    Slot::new(index).map_err(|_| ContractError::CurrencyOutOfRange {})
}

fn amount(raw: u64) -> ContractResult<Coin> {
    let amount = Coin::new(raw.into());
    if amount < MIN_AMOUNT {
        return Err(ContractError::AmountOutOfRange {});
    }
    Ok(amount)
}

fn check_credit_line<Lines>(
    maker: &Addr,
    posted_slot: Slot,
    posted_amount: Coin,
    lines: &Lines,
) -> ContractResult<()>
where
    Lines: CreditLines,
{
    if posted_slot.is_native() {
        return Ok(());
    }

    let ticker = posted_slot.def().ticker();
    let limit = lines
        .limit(maker, posted_slot)?
        .ok_or_else(|| ContractError::TrustlineMissing(ticker.into()))?;
    if limit < posted_amount {
        return Err(ContractError::TrustlineInsufficient(ticker.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use currency::Slot;
    use finance::coin::Coin;
    use sdk::cosmwasm_std::Addr;

    use crate::{
        memo::{MakeTerms, RawRole},
        state::loan::Role,
        ContractError, ContractResult,
    };

    use super::{vet, CreditLines};

    struct MockLines(HashMap<(Addr, u8), Coin>);

    impl CreditLines for MockLines {
        fn limit(&self, holder: &Addr, slot: Slot) -> ContractResult<Option<Coin>> {
            Ok(self.0.get(&(holder.clone(), slot.into())).copied())
        }
    }

    fn maker() -> Addr {
        Addr::unchecked("maker")
    }

    fn lines_for(slot: u8, limit: u128) -> MockLines {
        MockLines(HashMap::from([((maker(), slot), Coin::new(limit))]))
    }

    fn terms() -> MakeTerms {
        MakeTerms {
            role: RawRole::Borrower,
            loan_currency: 1,
            collateral_currency: 0,
            loan_amount: 50_000_000,
            collateral_amount: 80_000_000,
            interest_rate: 12_000,
            loan_period: 90,
        }
    }

    // posted = 80 native, fee floor applies
    const PAID_ENOUGH: Coin = Coin::new(90_000_000);

    #[test]
    fn accepts_native_collateral() {
        let vetted = vet(&terms(), &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap();
        assert_eq!(vetted.maker_role, Role::Borrower);
        assert_eq!(vetted.posted(), (Slot::NATIVE, Coin::new(80_000_000)));
        assert_eq!(vetted.fee, Coin::new(10_000_000));
        assert_eq!(
            vetted.interest,
            Coin::new(90 * 12_000 * 80_000_000 / 100_000 / 365)
        );
    }

    #[test]
    fn rejects_unknown_currency() {
        let mut t = terms();
        t.loan_currency = 6;
        assert_eq!(
            vet(&t, &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap_err(),
            ContractError::CurrencyOutOfRange {}
        );
    }

    #[test]
    fn rejects_degenerate_terms() {
        for t in [
            MakeTerms { loan_period: 0, ..terms() },
            MakeTerms { loan_period: 10_000, ..terms() },
            MakeTerms { interest_rate: 0, ..terms() },
            MakeTerms { interest_rate: 100_000, ..terms() },
            MakeTerms { loan_amount: 999, ..terms() },
            MakeTerms { collateral_amount: 999, ..terms() },
        ] {
            assert_eq!(
                vet(&t, &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap_err(),
                ContractError::AmountOutOfRange {},
                "{t:?}"
            );
        }
    }

    #[test]
    fn rejects_excessive_interest() {
        let t = MakeTerms {
            interest_rate: 99_999,
            loan_period: 9_999,
            ..terms()
        };
        assert_eq!(
            vet(&t, &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap_err(),
            ContractError::InterestCapExceeded {}
        );
    }

    #[test]
    fn issued_collateral_needs_credit_line() {
        let t = MakeTerms {
            collateral_currency: 2,
            ..terms()
        };

        assert_eq!(
            vet(&t, &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap_err(),
            ContractError::TrustlineMissing("EUR".into())
        );
        assert_eq!(
            vet(&t, &maker(), PAID_ENOUGH, &lines_for(2, 79_999_999)).unwrap_err(),
            ContractError::TrustlineInsufficient("EUR".into())
        );
        assert!(vet(&t, &maker(), PAID_ENOUGH, &lines_for(2, 80_000_000)).is_ok());
    }

    #[test]
    fn lender_posts_the_principal() {
        let t = MakeTerms {
            role: RawRole::Lender,
            ..terms()
        };

        // principal is issued, slot 1
        assert_eq!(
            vet(&t, &maker(), PAID_ENOUGH, &MockLines(HashMap::new())).unwrap_err(),
            ContractError::TrustlineMissing("GBP".into())
        );

        let vetted = vet(&t, &maker(), PAID_ENOUGH, &lines_for(1, 50_000_000)).unwrap();
        assert_eq!(
            vetted.posted(),
            (Slot::new(1).unwrap(), Coin::new(50_000_000))
        );
    }

    #[test]
    fn requires_posted_plus_fee() {
        let short = Coin::new(89_999_999);
        assert_eq!(
            vet(&terms(), &maker(), short, &MockLines(HashMap::new())).unwrap_err(),
            ContractError::InsufficientFunds {}
        );
    }
}

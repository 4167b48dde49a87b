//! Decoding of the fixed-width instruction format carried in payment memos.

use crate::{msg::Memo, state::RecordId, ContractError, ContractResult};

pub const FORMAT: &str = "text/plain";
pub const MEMO_TYPE: &str = "Description";

const MAKE_LEN: usize = 58;
const ID_LEN: usize = 65;

const CURRENCY_MAX: u64 = 24;
const AMOUNT_MAX: u64 = 1_844_674_407_370_955_160;
const RATE_MAX: u64 = 429_496_728;

/// A decoded instruction. Amounts and slots are raw wire values, range
/// checking beyond overflow guards happens during underwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Make(MakeTerms),
    Cancel { id: RecordId },
    Take { id: RecordId },
    Repay { id: RecordId },
    Close { id: RecordId },
    Resend { id: RecordId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeTerms {
    pub role: RawRole,
    pub loan_currency: u8,
    pub collateral_currency: u8,
    pub loan_amount: u64,
    pub collateral_amount: u64,
    pub interest_rate: u32,
    pub loan_period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawRole {
    Borrower,
    Lender,
}

pub fn decode(memo: &Memo) -> ContractResult<Instruction> {
    if memo.format != FORMAT || memo.memo_type != MEMO_TYPE {
        return Err(ContractError::MalformedMemo {});
    }

    let data = memo.data.as_bytes();
    let Some((&action, rest)) = data.split_first() else {
        return Err(ContractError::InvalidLength {});
    };

    match action {
        b'1' => decode_make(data),
        b'2' => Ok(Instruction::Cancel { id: decode_id(rest)? }),
        b'3' => Ok(Instruction::Take { id: decode_id(rest)? }),
        b'4' => Ok(Instruction::Repay { id: decode_id(rest)? }),
        b'5' => Ok(Instruction::Close { id: decode_id(rest)? }),
        b'6' => Ok(Instruction::Resend { id: decode_id(rest)? }),
        _ => Err(ContractError::InvalidAction {}),
    }
}

fn decode_make(data: &[u8]) -> ContractResult<Instruction> {
    if data.len() != MAKE_LEN {
        return Err(ContractError::InvalidLength {});
    }

    let role = match data[1] {
        b'1' => RawRole::Borrower,
        b'2' => RawRole::Lender,
        _ => return Err(ContractError::InvalidRole {}),
    };

    let loan_currency = field(&data[2..5], CURRENCY_MAX, Overflow::Currency)?;
    let loan_amount = field(&data[5..25], AMOUNT_MAX, Overflow::Amount)?;
    let collateral_currency = field(&data[25..28], CURRENCY_MAX, Overflow::Currency)?;
    let collateral_amount = field(&data[28..48], AMOUNT_MAX, Overflow::Amount)?;
    let interest_rate = field(&data[48..53], RATE_MAX, Overflow::Rate)?;
    let loan_period = field(&data[53..58], RATE_MAX, Overflow::Amount)?;

    Ok(Instruction::Make(MakeTerms {
        role,
        loan_currency: loan_currency as u8,
        collateral_currency: collateral_currency as u8,
        loan_amount,
        collateral_amount,
        interest_rate: interest_rate as u32,
        loan_period: loan_period as u32,
    }))
}

enum Overflow {
    Currency,
    Amount,
    Rate,
}

/// Accumulates a left-zero-padded decimal field, rejecting non-digits and
/// failing early once the running value could no longer take another digit.
fn field(digits: &[u8], max: u64, on_overflow: Overflow) -> ContractResult<u64> {
    digits.iter().try_fold(0u64, |acc, &c| {
        let d = u64::from(c.wrapping_sub(b'0'));
        if d > 9 {
            return Err(ContractError::MalformedMemo {});
        }
        if acc > max {
            return Err(match on_overflow {
                Overflow::Currency => ContractError::CurrencyOutOfRange {},
                Overflow::Amount => ContractError::AmountOutOfRange {},
                Overflow::Rate => ContractError::InterestOutOfRange {},
            });
        }
        Ok(acc * 10 + d)
    })
}

/// Decodes a 64-char uppercase-hex record id.
pub fn decode_id(data: &[u8]) -> ContractResult<RecordId> {
    if data.len() != ID_LEN - 1 {
        return Err(ContractError::InvalidLength {});
    }

    let mut key = [0u8; RecordId::LEN];
    for (byte, pair) in key.iter_mut().zip(data.chunks_exact(2)) {
        *byte = nibble(pair[0])? << 4 | nibble(pair[1])?;
    }
    Ok(RecordId::from_bytes(key))
}

fn nibble(c: u8) -> ContractResult<u8> {
    let v = if c < b'A' {
        c.wrapping_sub(b'0')
    } else {
        c.wrapping_sub(b'7')
    };
    if v > 0xF {
        return Err(ContractError::MalformedMemo {});
    }
    Ok(v)
}

pub fn encode_make(terms: &MakeTerms) -> String {
    let role = match terms.role {
        RawRole::Borrower => '1',
        RawRole::Lender => '2',
    };
    format!(
        "1{role}{:03}{:020}{:03}{:020}{:05}{:05}",
        terms.loan_currency,
        terms.loan_amount,
        terms.collateral_currency,
        terms.collateral_amount,
        terms.interest_rate,
        terms.loan_period,
    )
}

pub fn encode_action(action: char, id: &RecordId) -> String {
    format!("{action}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memo(data: &str) -> Memo {
        Memo {
            format: FORMAT.into(),
            memo_type: MEMO_TYPE.into(),
            data: data.into(),
        }
    }

    fn terms() -> MakeTerms {
        MakeTerms {
            role: RawRole::Borrower,
            loan_currency: 1,
            collateral_currency: 2,
            loan_amount: 50_000_000,
            collateral_amount: 75_000_000,
            interest_rate: 4_500,
            loan_period: 90,
        }
    }

    #[test]
    fn make_round_trip() {
        let encoded = encode_make(&terms());
        assert_eq!(encoded.len(), MAKE_LEN);
        assert_eq!(
            decode(&memo(&encoded)).unwrap(),
            Instruction::Make(terms())
        );
    }

    #[test]
    fn id_round_trip() {
        let id = RecordId::from_bytes([0xAB; 32]);
        let encoded = encode_action('4', &id);
        assert_eq!(encoded.len(), ID_LEN);
        assert_eq!(decode(&memo(&encoded)).unwrap(), Instruction::Repay { id });
    }

    #[test]
    fn wrong_wrapper_rejected() {
        let mut m = memo(&encode_make(&terms()));
        m.format = "application/json".into();
        assert!(matches!(
            decode(&m).unwrap_err(),
            ContractError::MalformedMemo {}
        ));

        let mut m = memo(&encode_make(&terms()));
        m.memo_type = "Payment".into();
        assert!(matches!(
            decode(&m).unwrap_err(),
            ContractError::MalformedMemo {}
        ));
    }

    #[test]
    fn empty_data_rejected() {
        assert!(matches!(
            decode(&memo("")).unwrap_err(),
            ContractError::InvalidLength {}
        ));
    }

    #[test]
    fn unknown_action_rejected() {
        assert!(matches!(
            decode(&memo("7")).unwrap_err(),
            ContractError::InvalidAction {}
        ));
        assert!(matches!(
            decode(&memo("0")).unwrap_err(),
            ContractError::InvalidAction {}
        ));
    }

    #[test]
    fn short_make_rejected() {
        assert!(matches!(
            decode(&memo("11001")).unwrap_err(),
            ContractError::InvalidLength {}
        ));
    }

    #[test]
    fn bad_role_rejected() {
        let mut encoded = encode_make(&terms()).into_bytes();
        encoded[1] = b'3';
        assert!(matches!(
            decode(&memo(core::str::from_utf8(&encoded).unwrap())).unwrap_err(),
            ContractError::InvalidRole {}
        ));
    }

    #[test]
    fn non_digit_in_field_rejected() {
        let mut encoded = encode_make(&terms()).into_bytes();
        encoded[10] = b'x';
        assert!(matches!(
            decode(&memo(core::str::from_utf8(&encoded).unwrap())).unwrap_err(),
            ContractError::MalformedMemo {}
        ));
    }

    #[test]
    fn currency_overflow_guard() {
        let mut t = terms();
        t.loan_currency = 250;
        assert!(matches!(
            decode(&memo(&encode_make(&t))).unwrap_err(),
            ContractError::CurrencyOutOfRange {}
        ));
    }

    #[test]
    fn amount_overflow_guard() {
        let encoded = format!(
            "11001{:020}002{:020}{:05}{:05}",
            u64::MAX as u128 + 1,
            75u64,
            4_500u32,
            90u32,
        );
        assert!(matches!(
            decode(&memo(&encoded)).unwrap_err(),
            ContractError::AmountOutOfRange {}
        ));
    }

    #[test]
    fn rate_overflow_guard() {
        // Five digits cannot overflow a u32, but a doctored wider field can.
        assert!(matches!(
            field(b"99999999999", super::RATE_MAX, Overflow::Rate).unwrap_err(),
            ContractError::InterestOutOfRange {}
        ));
    }

    #[test]
    fn lowercase_hex_rejected() {
        let data = "ab".repeat(32);
        assert!(matches!(
            decode_id(data.as_bytes()).unwrap_err(),
            ContractError::MalformedMemo {}
        ));
    }

    #[test]
    fn short_id_rejected() {
        assert!(matches!(
            decode_id(b"ABCD").unwrap_err(),
            ContractError::InvalidLength {}
        ));
    }
}

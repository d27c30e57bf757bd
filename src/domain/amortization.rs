//! Fixed-installment loan amortization.
//!
//! All arithmetic stays in `Decimal`. Installments and interest portions are
//! rounded to cents; the final installment absorbs whatever rounding residue
//! is left so the principal portions always add up to the principal exactly.

use super::loan::Payment;
use super::money::MONEY_SCALE;
use crate::error::{BankError, Result};
use chrono::{DateTime, Months, Utc};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an annual percentage rate into a monthly fraction.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Computes the fixed monthly installment, rounded to cents.
///
/// A zero rate falls back to straight-line repayment.
pub fn calculate_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal> {
    if term_months == 0 {
        return Err(BankError::invalid("loan term must be positive"));
    }
    let term = Decimal::from(term_months);
    let rate = monthly_rate(annual_rate_percent);

    if rate.is_zero() {
        return Ok(to_cents(principal / term));
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| BankError::invalid("loan term too long for the given rate"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(BankError::invalid("interest rate too small to amortize"));
    }

    let payment = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| BankError::Internal("monthly payment overflow".into()))?;
    Ok(to_cents(payment))
}

/// Builds the full schedule: `term_months` unpaid installments due one
/// calendar month apart, the first one month after `start_date`.
pub fn generate_payment_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
    start_date: DateTime<Utc>,
    monthly_payment: Decimal,
) -> Result<Vec<Payment>> {
    if term_months == 0 {
        return Err(BankError::invalid("loan term must be positive"));
    }
    let rate = monthly_rate(annual_rate_percent);
    let mut remaining = principal;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for period in 1..=term_months {
        let interest_part = to_cents(remaining * rate);
        // A rounded-up installment can pay a small principal off early; later
        // installments then carry no principal.
        let principal_part = if period == term_months {
            remaining
        } else {
            (monthly_payment - interest_part)
                .max(Decimal::ZERO)
                .min(remaining)
        };
        let amount = principal_part + interest_part;
        remaining -= principal_part;

        let due_date = start_date
            .checked_add_months(Months::new(period))
            .ok_or_else(|| BankError::Internal("due date out of range".into()))?;

        schedule.push(Payment {
            due_date,
            amount,
            principal_part,
            interest_part,
            paid: false,
        });
    }

    Ok(schedule)
}

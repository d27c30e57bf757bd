use super::money::decimal_money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One installment of a loan's payment schedule.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Payment {
    pub due_date: DateTime<Utc>,
    #[serde(with = "decimal_money")]
    pub amount: Decimal,
    #[serde(with = "decimal_money")]
    pub principal_part: Decimal,
    #[serde(with = "decimal_money")]
    pub interest_part: Decimal,
    pub paid: bool,
}

/// A loan issued against an account.
///
/// `remaining_amount` is set to the principal at issuance and is not
/// reconciled against paid installments.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Loan {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    #[serde(with = "decimal_money")]
    pub amount: Decimal,
    /// Annual rate in percent at issuance.
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub start_date: DateTime<Utc>,
    pub payment_schedule: Vec<Payment>,
    #[serde(with = "decimal_money")]
    pub remaining_amount: Decimal,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.remaining_amount > Decimal::ZERO
    }
}

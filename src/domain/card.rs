use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Serialize, Serializer};

/// A payment card linked to an account.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Card {
    pub id: String,
    pub account_id: String,
    pub number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    #[serde(serialize_with = "mask_cvv")]
    pub cvv: String,
    pub created_at: DateTime<Utc>,
}

fn mask_cvv<S>(_cvv: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str("***")
}

impl Card {
    /// Last instant the card is usable: the end of its expiry month.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let first = NaiveDate::from_ymd_opt(self.expiry_year, self.expiry_month, 1)?;
        let next_month = first.checked_add_months(Months::new(1))?;
        let end = next_month.and_hms_opt(0, 0, 0)? - chrono::Duration::seconds(1);
        Some(Utc.from_utc_datetime(&end))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|end| now > end)
    }

    /// Masked form used in logs.
    pub fn short_number(&self) -> String {
        mask_number(&self.number)
    }
}

/// Keeps the first four digits of a card number.
pub fn mask_number(number: &str) -> String {
    let prefix: String = number.chars().take(4).collect();
    format!("{prefix}...")
}

/// Expiry (month, year) for a card issued at `issued_at`.
pub fn expiry_from(issued_at: DateTime<Utc>, valid_years: u32) -> (u32, i32) {
    let expiry = issued_at
        .checked_add_months(Months::new(valid_years * 12))
        .unwrap_or(issued_at);
    (expiry.month(), expiry.year())
}

//! Request and response bodies. Money arrives as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateCardRequest {
    pub account_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub card_number: String,
    pub amount: Decimal,
    #[serde(default)]
    pub merchant: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub to_account_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ApplyLoanRequest {
    pub user_id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub term_months: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

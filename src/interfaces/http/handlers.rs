use super::AppState;
use super::error::ApiResult;
use super::requests::{
    ApplyLoanRequest, CreateAccountRequest, DepositRequest, GenerateCardRequest, LoginRequest,
    LoginResponse, MessageResponse, PaymentRequest, RegisterRequest, TransferRequest,
};
use crate::application::analytics::FinancialSummary;
use crate::application::loans::LoanApplication;
use crate::domain::account::Account;
use crate::domain::card::Card;
use crate::domain::loan::{Loan, Payment};
use crate::domain::transaction::Transaction;
use crate::domain::user::User;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn register_user(
    State(engine): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = engine
        .register_user(&req.username, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login_user(
    State(engine): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user_id = engine.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id,
    }))
}

pub async fn create_account(
    State(engine): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let account = engine.create_account(&req.user_id).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn user_accounts(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Account>> {
    Json(engine.user_accounts(&user_id).await)
}

pub async fn generate_card(
    State(engine): State<AppState>,
    Json(req): Json<GenerateCardRequest>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = engine.generate_card(&req.account_id).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn account_cards(
    State(engine): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<Vec<Card>>> {
    Ok(Json(engine.account_cards(&account_id).await?))
}

pub async fn pay_with_card(
    State(engine): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    engine
        .pay_with_card(&req.card_number, req.amount, &req.merchant)
        .await?;
    Ok(Json(MessageResponse::new("Payment successful")))
}

pub async fn transfer(
    State(engine): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<Json<MessageResponse>> {
    engine
        .transfer(&req.from_account_id, &req.to_account_id, req.amount)
        .await?;
    Ok(Json(MessageResponse::new("Transfer successful")))
}

pub async fn deposit(
    State(engine): State<AppState>,
    Json(req): Json<DepositRequest>,
) -> ApiResult<Json<MessageResponse>> {
    engine.deposit(&req.to_account_id, req.amount).await?;
    Ok(Json(MessageResponse::new("Deposit successful")))
}

pub async fn apply_loan(
    State(engine): State<AppState>,
    Json(req): Json<ApplyLoanRequest>,
) -> ApiResult<(StatusCode, Json<Loan>)> {
    let loan = engine
        .apply_loan(LoanApplication {
            user_id: req.user_id,
            account_id: req.account_id,
            amount: req.amount,
            term_months: req.term_months,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

pub async fn loan_schedule(
    State(engine): State<AppState>,
    Path(loan_id): Path<String>,
) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(engine.loan_schedule(&loan_id).await?))
}

pub async fn account_transactions(
    State(engine): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(engine.account_transactions(&account_id).await?))
}

pub async fn financial_summary(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<FinancialSummary> {
    Json(engine.financial_summary(&user_id).await)
}

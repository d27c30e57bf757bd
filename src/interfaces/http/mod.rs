//! JSON-over-HTTP surface built on axum.

pub mod error;
pub mod handlers;
pub mod requests;

use crate::application::engine::BankEngine;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub type AppState = Arc<BankEngine>;

pub fn app_router(engine: AppState) -> Router {
    Router::new()
        .route("/register", post(handlers::register_user))
        .route("/login", post(handlers::login_user))
        .route("/accounts", post(handlers::create_account))
        .route("/users/{user_id}/accounts", get(handlers::user_accounts))
        .route("/cards", post(handlers::generate_card))
        .route("/accounts/{account_id}/cards", get(handlers::account_cards))
        .route("/payments/card", post(handlers::pay_with_card))
        .route("/transfers", post(handlers::transfer))
        .route("/deposits", post(handlers::deposit))
        .route("/loans", post(handlers::apply_loan))
        .route("/loans/{loan_id}/schedule", get(handlers::loan_schedule))
        .route(
            "/analytics/transactions/{account_id}",
            get(handlers::account_transactions),
        )
        .route(
            "/analytics/summary/{user_id}",
            get(handlers::financial_summary),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

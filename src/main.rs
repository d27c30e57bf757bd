use clap::Parser;
use miette::{IntoDiagnostic, Result};
use simple_bank::application::engine::{BankEngine, LoanPricing};
use simple_bank::application::notifications::NotificationQueue;
use simple_bank::application::rate_cache::RateCache;
use simple_bank::config::Config;
use simple_bank::infrastructure::in_memory::InMemoryStore;
use simple_bank::infrastructure::notifier::LogNotifier;
use simple_bank::infrastructure::rate_source::FixedRateSource;
use simple_bank::interfaces::http::app_router;
use simple_bank::telemetry::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_format);

    tracing::info!("Starting Simple Bank API");

    let store = InMemoryStore::new();
    let rates = RateCache::with_ttl(
        Arc::new(FixedRateSource::new(config.base_rate)),
        config.rate_ttl(),
    );
    let (notifications, workers) = NotificationQueue::spawn(
        Arc::new(LogNotifier),
        config.notification_workers,
        config.notification_queue,
    );
    let engine = BankEngine::new(store, rates, notifications).with_pricing(LoanPricing {
        fallback_rate: config.fallback_rate,
        margin: config.bank_margin,
    });

    let router = app_router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .into_diagnostic()?;
    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    // The router (and with it the engine's queue handle) is gone; let the
    // workers drain what is left.
    workers.join().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

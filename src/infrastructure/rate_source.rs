use crate::domain::ports::RateSource;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Placeholder key-rate feed returning a configured constant.
///
/// Stands in for a live central-bank feed; swap in another `RateSource`
/// to price loans from real data.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSource {
    rate: Decimal,
}

impl FixedRateSource {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn fetch_rate(&self) -> Result<Decimal> {
        tracing::info!(rate = %self.rate, "Fetching key rate from placeholder source");
        Ok(self.rate)
    }
}

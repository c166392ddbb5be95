use crate::config::TimingConfig;
use rand::Rng;
use std::time::Duration;

/// Uniformly random duration in `[min_ms, max_ms]`
pub fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    if min_ms >= max_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rand::rng().random_range(min_ms..=max_ms))
}

/// Sleeps for the inter-listing throttle interval
pub async fn throttle(timing: &TimingConfig) {
    let delay = random_delay(timing.throttle_min_ms, timing.throttle_max_ms);
    if delay.is_zero() {
        return;
    }
    ::log::debug!("Sleeping {:.1}s before the next listing", delay.as_secs_f64());
    tokio::time::sleep(delay).await;
}

//! Token-bucket rate budget shared by all calls to one upstream.
//!
//! The dashboard's refresh flow used to pace itself with fixed sleeps
//! between category batches; the budget replaces that with an explicit
//! invariant: at most `quota_limit` calls per rolling `quota_window`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::provider_policy::ProviderPolicy;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared call budget for one quota-constrained upstream.
#[derive(Clone)]
pub struct RateBudget {
    limiter: Arc<DirectRateLimiter>,
}

impl RateBudget {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        let quota = quota_from_window(quota_window, quota_limit);
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    pub fn from_policy(policy: &ProviderPolicy) -> Self {
        Self::new(policy.quota_window, policy.quota_limit)
    }

    /// Wait until a call slot is available.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Non-blocking check; `false` means the budget is exhausted right now.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let safe_limit = quota_limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}

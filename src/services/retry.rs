use std::{future::Future, time::Duration};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::model_client::BackendFailure,
};

/// Waits between attempts. Swapped out in tests to avoid wall-clock delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(20),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.retry_base_delay,
            max_delay: config.retry_max_delay,
        }
    }

    /// Capped exponential delay for a zero-based attempt, scaled by `jitter`
    /// (expected in `0.7..1.3`).
    pub fn delay_for(&self, attempt: u32, jitter: f64) -> Duration {
        let factor = 1u32 << attempt.min(16);
        let capped = self.base_delay.saturating_mul(factor).min(self.max_delay);
        capped.mul_f64(jitter.clamp(0.0, 2.0))
    }
}

/// Random factor in `0.7..1.3`.
pub fn jitter_factor() -> f64 {
    let sample = (Uuid::new_v4().as_u128() % 10_000) as f64 / 10_000.0;
    0.7 + sample * 0.6
}

/// Runs `operation` until it succeeds, fails permanently, or the policy's
/// attempts are used up.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendFailure>>,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(BackendFailure::Permanent(message)) => {
                log::error!("Backend rejected request: {}", message);
                return Err(AppError::BackendError(message));
            }
            Err(BackendFailure::Transient(message)) => {
                log::warn!(
                    "Backend attempt {}/{} failed: {}",
                    attempt + 1,
                    policy.max_attempts,
                    message
                );
                last_error = Some(message);
                if attempt + 1 < policy.max_attempts {
                    sleeper.sleep(policy.delay_for(attempt, jitter_factor())).await;
                }
            }
        }
    }

    Err(AppError::BackendError(format!(
        "Backend failed after {} attempts: {}",
        policy.max_attempts,
        last_error.unwrap_or_else(|| "no attempts made".to_string())
    )))
}

//! Retry policies for outbound requests.

use std::time::Duration;

use crate::{FetchError, HttpTransport, RequestBuilder, Response, TimeoutConfig};

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u64.saturating_pow(attempt);
                let delay =
                    Duration::from_millis((base.as_millis() as u64).saturating_mul(multiplier));
                std::cmp::min(delay, *max)
            }
        }
    }

    /// The longest delay this strategy produces.
    pub fn ceiling(&self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { max, .. } => *max,
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(2),
        }
    }
}

/// Conditions that trigger a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// Retry on specific HTTP status code.
    StatusCode(u16),
    /// Retry on any 5xx status.
    ServerError,
    /// Retry on timeout.
    Timeout,
    /// Retry on connection error.
    ConnectionError,
}

impl RetryCondition {
    /// Check if a status code matches this condition.
    pub fn matches_status(&self, status: u16) -> bool {
        match self {
            Self::StatusCode(code) => status == *code,
            Self::ServerError => (500..600).contains(&status),
            _ => false,
        }
    }

    /// Check if a transport error matches this condition.
    pub fn matches_error(&self, error: &FetchError) -> bool {
        match (self, error) {
            (Self::Timeout, FetchError::Timeout(_)) => true,
            (Self::ConnectionError, FetchError::Connection(_)) => true,
            (_, FetchError::HttpError { status, .. }) => self.matches_status(*status),
            _ => false,
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the first try).
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
    /// Conditions that trigger retry.
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
            retry_on: vec![
                RetryCondition::ServerError,
                RetryCondition::StatusCode(429),
                RetryCondition::Timeout,
                RetryCondition::ConnectionError,
            ],
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
            retry_on: Vec::new(),
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Set retry conditions.
    pub fn with_conditions(mut self, conditions: Vec<RetryCondition>) -> Self {
        self.retry_on = conditions;
        self
    }

    /// Check if should retry based on status code.
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.retry_on.iter().any(|c| c.matches_status(status))
    }

    /// Check if should retry after a transport error.
    pub fn should_retry_error(&self, error: &FetchError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.retry_on.iter().any(|c| c.matches_error(error))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Send a request, applying the timeout to each attempt and retrying per policy.
///
/// Non-idempotent methods are sent once regardless of the policy. A response
/// with a non-retryable status is returned as-is; callers decide how to treat it.
pub async fn execute<T>(
    transport: &T,
    request: RequestBuilder,
    policy: &RetryPolicy,
    timeout: &TimeoutConfig,
) -> Result<Response, FetchError>
where
    T: HttpTransport + ?Sized,
{
    let max_attempts = if request.method().is_idempotent() {
        policy.max_attempts
    } else {
        0
    };
    let mut attempt = 0;

    loop {
        let outcome = match tokio::time::timeout(timeout.total, transport.send(request.clone()))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout.total)),
        };

        let retry = attempt < max_attempts
            && match &outcome {
                Ok(resp) => policy.should_retry_status(resp.status, attempt),
                Err(e) => policy.should_retry_error(e, attempt),
            };

        if !retry {
            return outcome;
        }

        let delay = retry_delay(&outcome, policy, timeout, attempt);

        tracing::warn!(
            url = request.url(),
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            outcome = %describe(&outcome),
            "retrying request"
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Delay before the next attempt. A `Retry-After` hint is honored up to the
/// larger of the backoff ceiling and the per-attempt timeout.
fn retry_delay(
    outcome: &Result<Response, FetchError>,
    policy: &RetryPolicy,
    timeout: &TimeoutConfig,
    attempt: u32,
) -> Duration {
    let backoff = policy.backoff.delay_for_attempt(attempt);
    match outcome {
        Ok(resp) => match resp.retry_after_secs() {
            Some(secs) => {
                let cap = std::cmp::max(policy.backoff.ceiling(), timeout.total);
                std::cmp::min(Duration::from_secs(secs), cap)
            }
            None => backoff,
        },
        Err(_) => backoff,
    }
}

fn describe(outcome: &Result<Response, FetchError>) -> String {
    match outcome {
        Ok(resp) => format!("status {}", resp.status),
        Err(e) => e.to_string(),
    }
}

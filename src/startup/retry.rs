//! Bounded retry with capped exponential backoff.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors raised when constructing a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryPolicyError {
    /// At least one attempt is required.
    #[error("retry policy needs at least one attempt")]
    ZeroAttempts,
    /// The initial delay must be positive.
    #[error("initial retry delay must be positive")]
    ZeroInitialDelay,
    /// The delay cap must not be below the initial delay.
    #[error("maximum retry delay {max:?} is below the initial delay {initial:?}")]
    MaxBelowInitial {
        /// Configured initial delay.
        initial: Duration,
        /// Configured cap.
        max: Duration,
    },
}

/// How often and how patiently an operation is retried.
///
/// The delay after the first failed attempt is `initial_delay`; each further
/// failure doubles it until `max_delay` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Default number of attempts, the first one included.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    /// Default delay after the first failure.
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);
    /// Default delay cap.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`RetryPolicyError`] for zero attempts, a zero initial delay,
    /// or a cap below the initial delay.
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
    ) -> Result<Self, RetryPolicyError> {
        if max_attempts == 0 {
            return Err(RetryPolicyError::ZeroAttempts);
        }
        if initial_delay.is_zero() {
            return Err(RetryPolicyError::ZeroInitialDelay);
        }
        if max_delay < initial_delay {
            return Err(RetryPolicyError::MaxBelowInitial {
                initial: initial_delay,
                max: max_delay,
            });
        }
        Ok(Self {
            max_attempts,
            initial_delay,
            max_delay,
        })
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        2_u32
            .checked_pow(exponent)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }
}

/// Why [`retry_with_policy`] gave up.
#[derive(Debug, Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Error of the final attempt.
        #[source]
        last_error: E,
    },
    /// An attempt failed with an error that is not retried.
    #[error("attempt {attempt} failed permanently: {error}")]
    Permanent {
        /// Attempt that failed.
        attempt: u32,
        /// The error.
        #[source]
        error: E,
    },
}

/// Runs `operation` until it succeeds, fails permanently, or the policy's
/// attempts are used up.
///
/// `operation` receives the 1-based attempt number. Errors for which
/// `is_retryable` returns `false` end the loop immediately.
///
/// # Errors
///
/// Returns [`RetryError::Permanent`] for non-retryable failures and
/// [`RetryError::Exhausted`] when the final attempt fails.
pub async fn retry_with_policy<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if !is_retryable(&error) => {
                return Err(RetryError::Permanent { attempt, error });
            }
            Err(last_error) if attempt >= policy.max_attempts() => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last_error,
                });
            }
            Err(error) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

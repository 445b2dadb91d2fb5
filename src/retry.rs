use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded retry policy shared by the network stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

/// Why a retried operation gave up.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was not retriable; returned after the attempt that produced it.
    Fatal(E),
    /// Every permitted attempt failed with a retriable error.
    Exhausted { attempts: u32, last: E },
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total attempts, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Run `op` until it succeeds, fails with an error `should_retry` rejects,
    /// or the attempt budget is spent.
    pub async fn run<T, E, F, Fut>(
        &self,
        operation: &'static str,
        mut op: F,
        should_retry: impl Fn(&E) -> bool,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !should_retry(&err) => return Err(RetryError::Fatal(err)),
                Err(err) if attempt >= self.max_attempts() => {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    let delay = calculate_backoff_delay(attempt - 1, self.base_delay);
                    warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Calculate exponential backoff delay with jitter
pub fn calculate_backoff_delay(attempt: u32, base_delay: Duration) -> Duration {
    // Cap the exponent so a misconfigured retry budget cannot stall a request
    let capped_attempt = attempt.min(5);

    let base_ms = base_delay.as_millis() as u64;
    let delay_ms = base_ms.saturating_mul(2_u64.saturating_pow(capped_attempt));

    // Add jitter: ±30% randomness
    let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
    Duration::from_millis((delay_ms as f64 * jitter_factor).round() as u64)
}

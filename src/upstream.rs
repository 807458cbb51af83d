use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use tracing::warn;

use crate::config::UpstreamConfig;

/// Run one external call under a deadline.
pub async fn with_timeout<T, F>(limit: Duration, what: &str, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(anyhow!("{} timed out after {:?}", what, limit)),
    }
}

/// Delay before retry number `attempt` (1-based), doubling each time.
pub fn backoff_for_attempt(cfg: &UpstreamConfig, attempt: u32) -> Duration {
    let factor = 2_u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(cfg.read_retry_backoff_ms.saturating_mul(factor))
}

/// Idempotent read: timeout per attempt plus bounded retries with backoff.
pub async fn read_with_retry<T, F, Fut>(cfg: &UpstreamConfig, what: &str, mut op: F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let attempts = cfg.read_retry_attempts.max(1);
    let mut attempt = 1;
    loop {
        match with_timeout(cfg.timeout(), what, op()).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts => {
                let delay = backoff_for_attempt(cfg, attempt);
                warn!(error = %e, attempt, ?delay, what, "read failed; retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e.context(format!("{} failed after {} attempts", what, attempt))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn cfg(attempts: u32) -> UpstreamConfig {
        UpstreamConfig {
            timeout_secs: 1,
            generation_timeout_secs: 1,
            read_retry_attempts: attempts,
            read_retry_backoff_ms: 1,
        }
    }

    #[test]
    fn backoff_doubles() {
        let c = UpstreamConfig {
            read_retry_backoff_ms: 100,
            ..UpstreamConfig::default()
        };
        assert_eq!(backoff_for_attempt(&c, 1), Duration::from_millis(100));
        assert_eq!(backoff_for_attempt(&c, 2), Duration::from_millis(200));
        assert_eq!(backoff_for_attempt(&c, 3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let out = read_with_retry(&cfg(3), "flaky read", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    anyhow::bail!("transient")
                }
                Ok(n)
            }
        })
        .await
        .unwrap();
        assert_eq!(out, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_bounded_attempts() {
        let calls = AtomicU32::new(0);
        let err = read_with_retry(&cfg(2), "broken read", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(anyhow!("down")) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(format!("{:#}", err).contains("broken read failed after 2 attempts"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires() {
        let err = with_timeout(Duration::from_millis(10), "slow call", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("slow call timed out"));
    }
}

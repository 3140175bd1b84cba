use std::future::Future;
use std::time::Duration;

use tokio::time::{
    Instant,
    sleep,
};
use tracing::*;

use crate::errors::*;

err_impl! {PollError,
    #[error("timed out waiting for {0}")]
    Timeout(String),
}

/// How often to re-check a condition and how long to keep trying before giving up.  Every wait in
/// the scenario goes through one of these, so nothing can hang forever on an external system that
/// never converges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub const fn new(interval: Duration, timeout: Duration) -> PollPolicy {
        PollPolicy { interval, timeout }
    }

    pub fn with_timeout(self, timeout: Duration) -> PollPolicy {
        PollPolicy { timeout, ..self }
    }
}

// The check returns Ok(Some(..)) when the condition is met, Ok(None) to keep waiting, or an error,
// which aborts the wait immediately.  The check always runs at least once, even with a zero
// timeout.  A timeout too large to represent as an instant means there is no deadline at all.
pub async fn poll_until<T, F, Fut>(what: &str, policy: &PollPolicy, mut check: F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<Option<T>>>,
{
    let deadline = Instant::now().checked_add(policy.timeout);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if let Some(res) = check().await? {
            debug!("{what} satisfied after {attempts} attempt(s)");
            return Ok(res);
        }

        let next_attempt = Instant::now().checked_add(policy.interval);
        let out_of_time = match (deadline, next_attempt) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(deadline), Some(next)) => next > deadline,
        };
        if out_of_time {
            warn!("giving up on {what} after {attempts} attempt(s)");
            bail!(PollError::timeout(what));
        }
        debug!("still waiting for {what}, sleeping {:?}", policy.interval);
        sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use assertables::*;
    use rstest::*;
    use tracing_test::traced_test;

    use super::*;

    const NO_WAIT: PollPolicy = PollPolicy::new(Duration::ZERO, Duration::from_millis(50));

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn test_poll_until_eventually_satisfied() {
        let calls = Cell::new(0);
        let res = poll_until("the thing", &NO_WAIT, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Ok::<_, anyhow::Error>((n >= 3).then_some(n)) }
        })
        .await
        .unwrap();
        assert_eq!(res, 3);
        assert_eq!(calls.get(), 3);
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn test_poll_until_timeout() {
        let policy = PollPolicy::new(Duration::from_millis(10), Duration::ZERO);
        let calls = Cell::new(0);
        let err = poll_until("the thing", &policy, || {
            calls.set(calls.get() + 1);
            async { Ok::<Option<()>, anyhow::Error>(None) }
        })
        .await
        .unwrap_err()
        .downcast::<PollError>()
        .unwrap();
        assert!(matches!(err, PollError::Timeout(ref what) if what == "the thing"));
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn test_poll_until_unrepresentable_timeout() {
        let policy = PollPolicy::new(Duration::ZERO, Duration::MAX);
        let calls = Cell::new(0);
        let res = poll_until("the thing", &policy, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Ok::<_, anyhow::Error>((n >= 2).then_some(n)) }
        })
        .await
        .unwrap();
        assert_eq!(res, 2);
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn test_poll_until_unrepresentable_interval() {
        let policy = PollPolicy::new(Duration::MAX, Duration::from_secs(60));
        let err = poll_until("the thing", &policy, || async { Ok::<Option<()>, anyhow::Error>(None) })
            .await
            .unwrap_err()
            .downcast::<PollError>()
            .unwrap();
        assert!(matches!(err, PollError::Timeout(..)));
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn test_poll_until_error_aborts() {
        let calls = Cell::new(0);
        let err = poll_until("the thing", &NO_WAIT, || {
            calls.set(calls.get() + 1);
            async { Err::<Option<()>, _>(anyhow!("boom")) }
        })
        .await
        .unwrap_err();
        assert_contains!(err.to_string(), "boom");
        assert_eq!(calls.get(), 1);
    }
}

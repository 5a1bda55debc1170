//! Linear backoff for rate-limited (HTTP 429) responses.
use crate::error::Result;
use log::warn;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// How long to wait between retries of a rate-limited request.
///
/// The pause grows by `step` after every 429 and retrying stops once the
/// pause exceeds `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub step: Duration,
    pub ceiling: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(2),
            ceiling: Duration::from_secs(30),
        }
    }
}

/// Anything that carries an HTTP status.
pub trait HasStatus {
    fn status(&self) -> StatusCode;
}

impl HasStatus for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }
}

#[cfg(test)]
impl HasStatus for StatusCode {
    fn status(&self) -> StatusCode {
        *self
    }
}

/// Final response of a retried request.
#[derive(Debug)]
pub struct Retried<R> {
    pub response: R,
    pub attempts: u32,
    pub waited: Duration,
}

impl<R: HasStatus> Retried<R> {
    pub fn still_rate_limited(&self) -> bool {
        self.response.status() == StatusCode::TOO_MANY_REQUESTS
    }
}

/// Sends a request, resending it after a growing pause while the server answers 429.
pub async fn send_with_backoff<R, F, Fut>(backoff: &Backoff, mut send: F) -> Result<Retried<R>>
where
    R: HasStatus,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let mut response = send().await?;
    let mut attempts = 1;
    let mut pause = Duration::ZERO;
    let mut waited = Duration::ZERO;

    while response.status() == StatusCode::TOO_MANY_REQUESTS {
        pause += backoff.step;
        warn!(
            "Requests are being rate limited, waiting and retrying in {:?}",
            pause
        );
        tokio::time::sleep(pause).await;
        waited += pause;

        response = send().await?;
        attempts += 1;
        if pause > backoff.ceiling {
            break;
        }
    }

    Ok(Retried {
        response,
        attempts,
        waited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrateError;
    use std::collections::VecDeque;
    use tokio::time::Instant;

    async fn run_script(statuses: &[u16]) -> (Retried<StatusCode>, Duration, usize) {
        let mut script: VecDeque<StatusCode> = statuses
            .iter()
            .map(|code| StatusCode::from_u16(*code).unwrap())
            .collect();
        let mut sent = 0;
        let started = Instant::now();
        let retried = send_with_backoff(&Backoff::default(), || {
            sent += 1;
            let status = script.pop_front().unwrap_or(StatusCode::TOO_MANY_REQUESTS);
            async move { Ok(status) }
        })
        .await
        .unwrap();
        (retried, started.elapsed(), sent)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_response_accepted_without_sleeping() {
        let (retried, elapsed, sent) = run_script(&[200]).await;
        assert_eq!(retried.response, StatusCode::OK);
        assert_eq!(retried.attempts, 1);
        assert_eq!(retried.waited, Duration::ZERO);
        assert_eq!(elapsed, Duration::ZERO);
        assert_eq!(sent, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_rate_limits_then_success() {
        let (retried, elapsed, sent) = run_script(&[429, 429, 200]).await;
        assert_eq!(retried.response, StatusCode::OK);
        assert_eq!(retried.attempts, 3);
        assert_eq!(sent, 3);
        // 2s + 4s
        assert_eq!(retried.waited, Duration::from_secs(6));
        assert!(elapsed >= Duration::from_secs(6));
        assert!(elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_statuses_are_not_retried() {
        let (retried, _, sent) = run_script(&[500, 200]).await;
        assert_eq!(retried.response, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(sent, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_once_pause_exceeds_ceiling() {
        let (retried, _, sent) = run_script(&[]).await;
        assert!(retried.still_rate_limited());
        // pauses of 2, 4, ..., 32 seconds: 16 sleeps, 17 requests
        assert_eq!(retried.attempts, 17);
        assert_eq!(sent, 17);
        assert_eq!(retried.waited, Duration::from_secs(272));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_policy() {
        let backoff = Backoff {
            step: Duration::from_millis(10),
            ceiling: Duration::from_millis(25),
        };
        let retried = send_with_backoff(&backoff, || async { Ok(StatusCode::TOO_MANY_REQUESTS) })
            .await
            .unwrap();
        // pauses of 10, 20, 30 ms
        assert_eq!(retried.attempts, 4);
        assert_eq!(retried.waited, Duration::from_millis(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_propagates() {
        let mut calls = 0;
        let result: Result<Retried<StatusCode>> = send_with_backoff(&Backoff::default(), || {
            calls += 1;
            let call = calls;
            async move {
                if call == 1 {
                    Ok(StatusCode::TOO_MANY_REQUESTS)
                } else {
                    Err(CrateError::MalformedResponse("connection reset".to_string()))
                }
            }
        })
        .await;
        assert!(matches!(result, Err(CrateError::MalformedResponse(_))));
        assert_eq!(calls, 2);
    }
}

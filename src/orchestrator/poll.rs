use std::time::Duration;
use tracing::{debug, trace};

use crate::error::TurnError;
use crate::vendor::requests::assistant::RunStatus;
use crate::vendor::Assistant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            interval: Duration::from_millis(1500),
            max_attempts: 120,
        }
    }
}

/// Sleeps, checks the run, and repeats until the run is terminal or the attempts
/// run out. Only the calling task waits.
pub async fn wait_for_run(
    assistant: &dyn Assistant,
    thread_id: &str,
    run_id: &str,
    policy: PollPolicy,
) -> Result<RunStatus, TurnError> {
    for attempt in 1..=policy.max_attempts {
        tokio::time::sleep(policy.interval).await;
        let run = assistant.retrieve_run(thread_id, run_id).await?;
        if run.status.outcome().is_some() {
            debug!(attempt, status = %run.status, "run finished");
            return Ok(run.status);
        }
        trace!(attempt, status = %run.status, "run pending");
    }

    Err(TurnError::Timeout {
        attempts: policy.max_attempts,
    })
}

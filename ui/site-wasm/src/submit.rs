//! Stand-in for a real contact endpoint.

use async_trait::async_trait;
use cnr_site_core::{ContactSubmission, SubmitError, Submitter};
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

/// Waits `delay_ms`, then reports success. Nothing leaves the browser.
pub struct SimulatedSubmitter {
    delay_ms: u32,
}

impl SimulatedSubmitter {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

#[async_trait(?Send)]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), SubmitError> {
        let payload = serde_json::to_string(submission)
            .map_err(|err| SubmitError::Rejected(err.to_string()))?;
        debug!(%payload, delay_ms = self.delay_ms, "simulating contact delivery");
        TimeoutFuture::new(self.delay_ms).await;
        Ok(())
    }
}

//! Submission control and request dispatch

use crate::analysis::client::ScoringClient;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::response::AnalysisResponse;
use crate::error::{AtsMatchError, Result};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const READY_LABEL: &str = "Analyze Match";
pub const BUSY_LABEL: &str = "Analyzing...";

/// The submit button: disabled with a busy label while a request is in flight.
#[derive(Debug, Default)]
pub struct SubmitControl {
    busy: AtomicBool,
}

/// Re-enables the control when dropped, whatever the request outcome.
pub struct SubmitGuard<'a> {
    control: &'a SubmitControl,
}

impl SubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<SubmitGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard { control: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            READY_LABEL
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.busy.store(false, Ordering::Release);
    }
}

pub struct AnalysisDispatcher {
    client: Arc<dyn ScoringClient>,
    control: SubmitControl,
}

impl AnalysisDispatcher {
    pub fn new(client: Arc<dyn ScoringClient>) -> Self {
        Self {
            client,
            control: SubmitControl::new(),
        }
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// Send one request. A second call while one is pending is refused.
    pub async fn dispatch(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResponse> {
        let _guard = self
            .control
            .try_acquire()
            .ok_or(AtsMatchError::SubmissionInFlight)?;

        info!("Submitting analysis request");
        let result = self.client.analyze(request).await;

        match &result {
            Ok(response) => info!("Analysis complete: {}% match", response.match_percentage),
            Err(e) => warn!("Analysis failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::request::AnalysisRequestBuilder;
    use crate::input::controller::InputModeController;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct GatedClient {
        gate: Arc<Notify>,
        fail: bool,
    }

    #[async_trait]
    impl ScoringClient for GatedClient {
        async fn analyze(&self, _request: &AnalysisRequest<'_>) -> Result<AnalysisResponse> {
            self.gate.notified().await;
            if self.fail {
                return Err(AtsMatchError::Transport("connection reset".into()));
            }
            Ok(AnalysisResponse {
                match_percentage: 50.0,
                matched_keywords: vec![],
                missing_keywords: vec![],
                matched_skills: vec![],
                missing_skills: vec![],
                optimization_tips: vec![],
                detected_industry: None,
            })
        }

        async fn supported_industries(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_guard_releases_control() {
        let control = SubmitControl::new();
        assert_eq!(control.label(), READY_LABEL);

        let guard = control.try_acquire().unwrap();
        assert!(control.is_busy());
        assert_eq!(control.label(), BUSY_LABEL);
        assert!(control.try_acquire().is_none());

        drop(guard);
        assert!(control.is_enabled());
    }

    async fn run_gated(fail: bool) {
        let gate = Arc::new(Notify::new());
        let dispatcher = AnalysisDispatcher::new(Arc::new(GatedClient {
            gate: Arc::clone(&gate),
            fail,
        }));
        let mut cv = InputModeController::new();
        cv.set_typed_text("5 years Go");
        let request = AnalysisRequestBuilder::build("Go engineer", &cv).unwrap();

        let first = dispatcher.dispatch(&request);
        let second = async {
            tokio::task::yield_now().await;
            assert!(dispatcher.control().is_busy());
            let refused = dispatcher.dispatch(&request).await;
            assert!(matches!(refused, Err(AtsMatchError::SubmissionInFlight)));
            gate.notify_one();
        };

        let (result, _) = tokio::join!(first, second);
        assert_eq!(result.is_err(), fail);
        assert!(dispatcher.control().is_enabled());
    }

    #[tokio::test]
    async fn test_second_submit_refused_while_in_flight() {
        run_gated(false).await;
    }

    #[tokio::test]
    async fn test_control_restored_after_failure() {
        run_gated(true).await;
    }
}

//! Step-based progress used when no real job is attached (offline/demo
//! mode) and for deriving a step display from coarse job progress.

use serde::{Deserialize, Serialize};

use crate::config::StepConfig;

/// Step id that is pre-marked complete: by the time processing starts the
/// photos have already been uploaded.
pub const UPLOAD_STEP_ID: &str = "upload";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "Pending"),
            StepStatus::Processing => write!(f, "Processing"),
            StepStatus::Completed => write!(f, "Completed"),
            StepStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A named processing step with its own 0-100 progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStep {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: StepStatus,
    pub progress: f64,
    /// Nominal duration in seconds, fixed configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_secs: Option<u64>,
}

impl ProcessingStep {
    fn from_config(config: &StepConfig) -> Self {
        let completed = config.id == UPLOAD_STEP_ID;
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            description: config.description.clone(),
            status: if completed {
                StepStatus::Completed
            } else {
                StepStatus::Pending
            },
            progress: if completed { 100.0 } else { 0.0 },
            estimated_secs: config.estimated_secs,
        }
    }
}

/// Ordered list of processing steps driven one step at a time.
#[derive(Debug, Clone)]
pub struct StepTracker {
    steps: Vec<ProcessingStep>,
}

impl StepTracker {
    /// Builds the tracker from configured steps. The upload step starts
    /// complete; everything else starts pending.
    pub fn new(configs: &[StepConfig]) -> Self {
        Self {
            steps: configs.iter().map(ProcessingStep::from_config).collect(),
        }
    }

    pub fn steps(&self) -> &[ProcessingStep] {
        &self.steps
    }

    /// First step currently in the Processing state.
    pub fn current_step(&self) -> Option<&ProcessingStep> {
        self.steps
            .iter()
            .find(|s| s.status == StepStatus::Processing)
    }

    /// Advances exactly one step by `increment` percent: the first
    /// Processing step, or — if none is active — the first Pending step,
    /// which is promoted to Processing. A step reaching 100 is marked
    /// Completed; the next tick starts advancing the following step.
    pub fn advance(&mut self, increment: f64) {
        let index = match self
            .steps
            .iter()
            .position(|s| s.status == StepStatus::Processing)
        {
            Some(i) => Some(i),
            None => {
                let pending = self
                    .steps
                    .iter()
                    .position(|s| s.status == StepStatus::Pending);
                if let Some(i) = pending {
                    self.steps[i].status = StepStatus::Processing;
                }
                pending
            }
        };

        if let Some(i) = index {
            let step = &mut self.steps[i];
            step.progress = (step.progress + increment).min(100.0);
            if step.progress >= 100.0 {
                step.progress = 100.0;
                step.status = StepStatus::Completed;
            }
        }
    }

    /// Exact arithmetic mean of all step progress values.
    pub fn mean_progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.steps.iter().map(|s| s.progress).sum();
        sum / self.steps.len() as f64
    }

    /// Rounded overall percentage for display.
    pub fn overall_progress(&self) -> u8 {
        self.mean_progress().round().min(100.0) as u8
    }

    /// Estimated seconds remaining: the active step's nominal duration
    /// scaled by its remaining fraction, plus the full nominal duration of
    /// every step still pending, rounded up.
    pub fn estimated_remaining_secs(&self) -> u64 {
        let mut total = 0.0;

        if let Some(current) = self.current_step() {
            if let Some(nominal) = current.estimated_secs {
                total += nominal as f64 * (1.0 - current.progress / 100.0);
            }
        }

        for step in &self.steps {
            if step.status == StepStatus::Pending {
                if let Some(nominal) = step.estimated_secs {
                    total += nominal as f64;
                }
            }
        }

        total.ceil() as u64
    }

    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Completed)
    }

    pub fn has_failed(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Failed)
    }

    /// Resets every step to Pending at 0, except the upload step which
    /// stays Completed at 100. Used when retrying a failed generation.
    pub fn reset_for_retry(&mut self) {
        for step in &mut self.steps {
            if step.id == UPLOAD_STEP_ID {
                step.status = StepStatus::Completed;
                step.progress = 100.0;
            } else {
                step.status = StepStatus::Pending;
                step.progress = 0.0;
            }
        }
    }

    /// Derives step states from a job's coarse overall progress, splitting
    /// the 0-100 range evenly across steps.
    pub fn sync_from_progress(&mut self, progress: u8) {
        if self.steps.is_empty() {
            return;
        }
        let progress = progress.min(100) as f64;
        let per_step = 100.0 / self.steps.len() as f64;
        let completed = (progress / per_step).floor() as usize;

        for (index, step) in self.steps.iter_mut().enumerate() {
            if index < completed {
                step.status = StepStatus::Completed;
                step.progress = 100.0;
            } else if index == completed {
                step.status = StepStatus::Processing;
                step.progress = (progress % per_step) * (100.0 / per_step);
            } else {
                step.status = StepStatus::Pending;
                step.progress = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_steps;

    fn tracker() -> StepTracker {
        StepTracker::new(&default_steps())
    }

    #[test]
    fn test_initial_state() {
        let tracker = tracker();
        assert_eq!(tracker.steps().len(), 5);
        assert_eq!(tracker.steps()[0].status, StepStatus::Completed);
        assert_eq!(tracker.steps()[0].progress, 100.0);
        for step in &tracker.steps()[1..] {
            assert_eq!(step.status, StepStatus::Pending);
            assert_eq!(step.progress, 0.0);
        }
        assert!(!tracker.is_complete());
    }

    #[test]
    fn test_advance_promotes_first_pending() {
        let mut tracker = tracker();
        tracker.advance(10.0);

        let analysis = &tracker.steps()[1];
        assert_eq!(analysis.status, StepStatus::Processing);
        assert_eq!(analysis.progress, 10.0);
        // Later steps untouched
        assert_eq!(tracker.steps()[2].status, StepStatus::Pending);
    }

    #[test]
    fn test_advance_moves_one_step_at_a_time() {
        let mut tracker = tracker();
        tracker.advance(60.0);
        tracker.advance(60.0);

        // First tick promoted analysis and brought it to 60; second tick
        // capped it at 100 and completed it without touching generation.
        assert_eq!(tracker.steps()[1].status, StepStatus::Completed);
        assert_eq!(tracker.steps()[1].progress, 100.0);
        assert_eq!(tracker.steps()[2].status, StepStatus::Pending);

        tracker.advance(25.0);
        assert_eq!(tracker.steps()[2].status, StepStatus::Processing);
        assert_eq!(tracker.steps()[2].progress, 25.0);
    }

    #[test]
    fn test_runs_to_completion() {
        let mut tracker = tracker();
        for _ in 0..100 {
            tracker.advance(50.0);
            if tracker.is_complete() {
                break;
            }
        }
        assert!(tracker.is_complete());
        assert_eq!(tracker.overall_progress(), 100);
    }

    #[test]
    fn test_mean_is_100_iff_all_completed() {
        let mut tracker = tracker();
        assert_ne!(tracker.mean_progress(), 100.0);

        // Drive every step except the last to completion
        while tracker.steps().iter().filter(|s| s.status == StepStatus::Completed).count() < 4 {
            tracker.advance(100.0);
        }
        // Last step short of 100
        tracker.advance(99.0);
        assert!(!tracker.is_complete());
        assert!(tracker.mean_progress() < 100.0);

        tracker.advance(1.0);
        assert!(tracker.is_complete());
        assert_eq!(tracker.mean_progress(), 100.0);
    }

    #[test]
    fn test_estimated_remaining() {
        let mut tracker = tracker();
        // Nothing processing yet: all pending nominals (30 + 120 + 15 + 20)
        assert_eq!(tracker.estimated_remaining_secs(), 185);

        // Analysis at 50%: 15 remaining there + 155 pending
        tracker.advance(50.0);
        assert_eq!(tracker.estimated_remaining_secs(), 170);

        // Finish analysis; generation not yet started
        tracker.advance(50.0);
        assert_eq!(tracker.estimated_remaining_secs(), 155);
    }

    #[test]
    fn test_reset_for_retry() {
        let mut tracker = tracker();
        for _ in 0..20 {
            tracker.advance(40.0);
        }

        tracker.reset_for_retry();
        for step in tracker.steps() {
            if step.id == UPLOAD_STEP_ID {
                assert_eq!(step.status, StepStatus::Completed);
                assert_eq!(step.progress, 100.0);
            } else {
                assert_eq!(step.status, StepStatus::Pending);
                assert_eq!(step.progress, 0.0);
            }
        }
    }

    #[test]
    fn test_sync_from_progress() {
        let mut tracker = tracker();
        tracker.sync_from_progress(50);

        // 50% of 5 steps: two complete, third halfway
        assert_eq!(tracker.steps()[0].status, StepStatus::Completed);
        assert_eq!(tracker.steps()[1].status, StepStatus::Completed);
        assert_eq!(tracker.steps()[2].status, StepStatus::Processing);
        assert!((tracker.steps()[2].progress - 50.0).abs() < 1e-9);
        assert_eq!(tracker.steps()[3].status, StepStatus::Pending);
        assert_eq!(tracker.steps()[4].status, StepStatus::Pending);
    }

    #[test]
    fn test_sync_from_progress_clamps() {
        let mut tracker = tracker();
        tracker.sync_from_progress(200);
        // Clamped to 100: everything complete
        assert!(tracker
            .steps()
            .iter()
            .all(|s| s.status == StepStatus::Completed));
    }

    #[test]
    fn test_overall_progress_bounds() {
        let mut tracker = tracker();
        assert!(tracker.overall_progress() <= 100);
        for _ in 0..50 {
            tracker.advance(35.0);
            assert!(tracker.overall_progress() <= 100);
        }
    }
}

//! The rating box component
//!
//! `RatingBox` owns the rating state and drives the submission pipeline:
//!
//! 1. `request_submit()` runs the guard through the reducer.
//! 2. On acceptance the state becomes `Submitting`, the tracker is called on
//!    the caller's thread, and the submitter is spawned on Tokio.
//! 3. The spawned task reports back through a one-shot channel whose
//!    receiving half lives in `RatingBox`. The outcome is applied only when
//!    the owner calls `poll_completion()` or `settle()`, so every state
//!    change happens through `&mut self` on the owner's side.
//!
//! Dropping the `RatingBox` drops the receiver; a late outcome then fails to
//! send and is discarded by the task without touching any state.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::events::{Event, EventBus, EventReceiver, DEFAULT_CAPACITY};
use crate::config::Config;
use crate::error::{Result, SubmitError};
use crate::model::{reduce, Action, Effect, RatingState, TransitionResult};
use crate::ports::{create_submitter, create_tracker, Submitter, Tracker};
use crate::types::{Rating, SubmissionState};

type Outcome = std::result::Result<(), SubmitError>;

/// Submission currently in flight
struct PendingSubmission {
    episode: u64,
    receiver: oneshot::Receiver<Outcome>,
}

/// Star rating capture with a single-flight submission state machine
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use libratingbox::ports::mock::{MockSubmitter, RecordingTracker};
/// use libratingbox::{RatingBox, SubmissionState};
///
/// # async fn example() {
/// let mut rating_box = RatingBox::new(
///     Arc::new(MockSubmitter::success()),
///     Arc::new(RecordingTracker::new()),
/// );
///
/// rating_box.select_rating(5);
/// rating_box.request_submit();
/// assert_eq!(rating_box.submission_state(), &SubmissionState::Submitting);
///
/// rating_box.settle().await;
/// assert_eq!(rating_box.submission_state(), &SubmissionState::Success);
/// # }
/// ```
pub struct RatingBox {
    state: RatingState,
    submitter: Arc<dyn Submitter>,
    tracker: Arc<dyn Tracker>,
    event_bus: EventBus,
    pending: Option<PendingSubmission>,
    episodes: u64,
    runtime: Option<Handle>,
}

impl RatingBox {
    /// Create a rating box with the given collaborators
    pub fn new(submitter: Arc<dyn Submitter>, tracker: Arc<dyn Tracker>) -> Self {
        Self::with_event_bus(submitter, tracker, EventBus::new(DEFAULT_CAPACITY))
    }

    /// Create a rating box that publishes on an existing event bus
    pub fn with_event_bus(
        submitter: Arc<dyn Submitter>,
        tracker: Arc<dyn Tracker>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state: RatingState::new(),
            submitter,
            tracker,
            event_bus,
            pending: None,
            episodes: 0,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Create a rating box with collaborators built from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the submitter
    /// cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let submitter = create_submitter(&config.submitter)?;
        let tracker = create_tracker(&config.tracker);
        Ok(Self::with_event_bus(
            submitter,
            tracker,
            EventBus::new(config.events.capacity),
        ))
    }

    /// Run submissions on `handle`
    ///
    /// Constructors pick up the runtime they are called from. Use this when
    /// the rating box is built, or driven, outside of one.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Select a rating
    ///
    /// The value is stored as given. Emits `RatingChanged` followed by
    /// `SubmitEnabledChanged` on every call.
    pub fn select_rating(&mut self, rating: Rating) {
        debug!(rating, "Rating selected");
        self.dispatch(Action::SelectRating(rating));
        self.event_bus.emit(Event::RatingChanged { rating });
        self.event_bus.emit(Event::SubmitEnabledChanged {
            enabled: self.state.is_submit_enabled(),
        });
    }

    /// Request submission of the current rating
    ///
    /// Ignored without any state change or side effect when no positive
    /// rating is selected or a submission is already in flight.
    ///
    /// The submitter runs on the captured runtime, or the caller's one. With
    /// neither available an accepted request resolves to `Failure` on the
    /// next `poll_completion()`.
    pub fn request_submit(&mut self) {
        if !self.state.can_submit() {
            debug!(
                rating = self.state.rating(),
                state = %self.state.submission(),
                "Submit request dropped"
            );
        }
        self.dispatch(Action::RequestSubmit);
    }

    /// Apply the in-flight submission's outcome if it has arrived
    ///
    /// Non-blocking; meant to be called from an event loop tick. Returns the
    /// new submission state when a transition happened.
    pub fn poll_completion(&mut self) -> Option<SubmissionState> {
        let pending = self.pending.as_mut()?;
        let outcome = match pending.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(lost_outcome()),
        };
        Some(self.resolve(outcome))
    }

    /// Wait for the in-flight submission and apply its outcome
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn settle(&mut self) -> Option<SubmissionState> {
        let pending = self.pending.as_mut()?;
        let outcome = match (&mut pending.receiver).await {
            Ok(outcome) => outcome,
            Err(_) => Err(lost_outcome()),
        };
        Some(self.resolve(outcome))
    }

    /// Currently selected rating (`0` when unset)
    pub fn current_rating(&self) -> Rating {
        self.state.rating()
    }

    /// Whether a submit request would pass the rating check
    pub fn is_submit_enabled(&self) -> bool {
        self.state.is_submit_enabled()
    }

    /// Current submission lifecycle state
    pub fn submission_state(&self) -> &SubmissionState {
        self.state.submission()
    }

    /// Snapshot of the whole state
    pub fn state(&self) -> &RatingState {
        &self.state
    }

    /// Whether a submission is waiting to be applied
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Subscribe to state changes made after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    fn dispatch(&mut self, action: Action) {
        let before = self.state.submission().clone();
        let TransitionResult { state, effects } = reduce(self.state.clone(), action);
        self.state = state;

        if self.state.submission() != &before {
            self.event_bus.emit(Event::SubmissionChanged {
                state: self.state.submission().clone(),
            });
        }

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Track { rating } => self.tracker.track(rating),
            Effect::Submit { rating } => self.spawn_submission(rating),
        }
    }

    fn spawn_submission(&mut self, rating: Rating) {
        self.episodes += 1;
        let episode = self.episodes;
        let (sender, receiver) = oneshot::channel();
        let submitter = Arc::clone(&self.submitter);

        info!(
            episode,
            rating,
            submitter = submitter.name(),
            "Submitting rating"
        );

        let runtime = match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                warn!(episode, "No Tokio runtime to run the submitter");
                let _ = sender.send(Err(no_runtime()));
                self.pending = Some(PendingSubmission { episode, receiver });
                return;
            }
        };

        runtime.spawn(async move {
            let outcome = submitter.submit(rating).await;
            if sender.send(outcome).is_err() {
                debug!(episode, "Rating box dropped before submission finished, discarding outcome");
            }
        });

        self.pending = Some(PendingSubmission { episode, receiver });
    }

    fn resolve(&mut self, outcome: Outcome) -> SubmissionState {
        let episode = self.pending.take().map(|p| p.episode).unwrap_or_default();

        match outcome {
            Ok(()) => {
                info!(episode, "Rating submitted");
                self.dispatch(Action::SubmitSucceeded);
            }
            Err(reason) => {
                warn!(episode, error = %reason, "Rating submission failed");
                self.dispatch(Action::SubmitFailed(reason));
            }
        }

        self.state.submission().clone()
    }
}

impl Drop for RatingBox {
    fn drop(&mut self) {
        if let Some(pending) = &self.pending {
            debug!(
                episode = pending.episode,
                "Rating box dropped with a submission in flight"
            );
        }
    }
}

fn no_runtime() -> SubmitError {
    SubmitError::other("No async runtime available to run the submission")
}

fn lost_outcome() -> SubmitError {
    SubmitError::other("Submission task ended without reporting a result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{CallLog, MockSubmitter, PortCall, RecordingTracker};
    use std::time::Duration;

    fn rating_box(submitter: MockSubmitter, tracker: RecordingTracker) -> RatingBox {
        RatingBox::new(Arc::new(submitter), Arc::new(tracker))
    }

    #[test]
    fn test_initial_state() {
        let rating_box = rating_box(MockSubmitter::success(), RecordingTracker::new());

        assert_eq!(rating_box.current_rating(), 0);
        assert!(!rating_box.is_submit_enabled());
        assert_eq!(rating_box.submission_state(), &SubmissionState::Idle);
        assert!(!rating_box.is_pending());
    }

    #[test]
    fn test_accepted_submit_without_runtime_fails() {
        let submitter = MockSubmitter::success();
        let tracker = RecordingTracker::new();
        let mut rating_box = rating_box(submitter.clone(), tracker.clone());

        rating_box.select_rating(5);
        rating_box.request_submit();

        assert_eq!(rating_box.submission_state(), &SubmissionState::Submitting);
        assert!(rating_box.is_pending());
        assert_eq!(
            rating_box.poll_completion(),
            Some(SubmissionState::Failure(no_runtime()))
        );
        assert_eq!(tracker.tracked(), vec![5]);
        assert_eq!(submitter.call_count(), 0);

        // Not stuck: the next request is accepted again
        rating_box.request_submit();
        assert_eq!(rating_box.submission_state(), &SubmissionState::Submitting);
        assert_eq!(tracker.tracked(), vec![5, 5]);
    }

    #[test]
    fn test_with_runtime_spawns_from_plain_thread() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let submitter = MockSubmitter::success();
        let mut rating_box = rating_box(submitter.clone(), RecordingTracker::new())
            .with_runtime(runtime.handle().clone());

        rating_box.select_rating(2);
        rating_box.request_submit();
        let state = runtime.block_on(rating_box.settle());

        assert_eq!(state, Some(SubmissionState::Success));
        assert_eq!(submitter.submitted(), vec![2]);
    }

    #[test]
    fn test_constructor_captures_current_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut rating_box = {
            let _guard = runtime.enter();
            rating_box(MockSubmitter::success(), RecordingTracker::new())
        };

        rating_box.select_rating(3);
        rating_box.request_submit();

        assert_eq!(
            runtime.block_on(rating_box.settle()),
            Some(SubmissionState::Success)
        );
    }

    #[tokio::test]
    async fn test_tracker_runs_before_submitter_is_spawned() {
        let log = CallLog::new();
        let submitter = MockSubmitter::success().with_call_log(log.clone());
        let tracker = RecordingTracker::new().with_call_log(log.clone());
        let mut rating_box = rating_box(submitter, tracker);

        rating_box.select_rating(3);
        rating_box.request_submit();

        // Tracker is synchronous; the submitter has not run yet on this thread
        assert_eq!(log.calls(), vec![PortCall::Track(3)]);

        rating_box.settle().await;
        assert_eq!(log.calls(), vec![PortCall::Track(3), PortCall::Submit(3)]);
    }

    #[tokio::test]
    async fn test_poll_completion_before_and_after_outcome() {
        let submitter = MockSubmitter::with_delay(Duration::from_millis(30));
        let mut rating_box = rating_box(submitter, RecordingTracker::new());

        rating_box.select_rating(4);
        rating_box.request_submit();

        assert_eq!(rating_box.poll_completion(), None);
        assert!(rating_box.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(rating_box.poll_completion(), Some(SubmissionState::Success));
        assert!(!rating_box.is_pending());
        assert_eq!(rating_box.poll_completion(), None);
    }

    #[tokio::test]
    async fn test_settle_without_pending_returns_none() {
        let mut rating_box = rating_box(MockSubmitter::success(), RecordingTracker::new());
        assert_eq!(rating_box.settle().await, None);
    }

    #[tokio::test]
    async fn test_lost_outcome_resolves_to_failure() {
        struct PanickingSubmitter;

        #[async_trait::async_trait]
        impl Submitter for PanickingSubmitter {
            async fn submit(&self, _rating: Rating) -> Outcome {
                panic!("transport blew up");
            }

            fn name(&self) -> &str {
                "panicking"
            }
        }

        let mut rating_box =
            RatingBox::new(Arc::new(PanickingSubmitter), Arc::new(RecordingTracker::new()));

        rating_box.select_rating(1);
        rating_box.request_submit();
        let state = rating_box.settle().await;

        assert_eq!(state, Some(SubmissionState::Failure(lost_outcome())));
    }

    #[test]
    fn test_from_config() {
        let config = Config::default_config();
        let rating_box = RatingBox::from_config(&config).unwrap();
        assert_eq!(rating_box.submission_state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let mut config = Config::default_config();
        config.events.capacity = 0;
        assert!(RatingBox::from_config(&config).is_err());
    }
}

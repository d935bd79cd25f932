use std::sync::Arc;
use std::time::{Duration, Instant};
use validator::Validate;

use super::Intent;
use crate::core::{
    DismissTimer, DragFeedback, GestureInterpreter, GestureOutcome, GestureThresholds, Overlay,
    PointerEvent, SwipeSession,
};
use crate::models::{
    IntentResponse, MatchEvent, Notice, SwipeDirection, UserRole, UserSettings, DEFAULT_USER_ID,
};
use crate::services::CoordinatorDirectory;

/// Tunables the driver reads from configuration
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub thresholds: GestureThresholds,
    pub auto_dismiss: Option<Duration>,
    pub user: UserSettings,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            thresholds: GestureThresholds::default(),
            auto_dismiss: Some(Duration::from_secs(5)),
            user: UserSettings {
                id: DEFAULT_USER_ID.to_string(),
                name: "田中 太郎".to_string(),
                role: UserRole::CareRecipient,
            },
        }
    }
}

/// Everything one user's screen holds
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SwipeSession,
    pub gesture: GestureInterpreter,
    pub overlay: Overlay,
    pub user: UserSettings,
    auto_dismiss: Option<Duration>,
    /// Card under the pointer when the current drag started
    drag_target: Option<String>,
}

impl AppState {
    pub fn new(directory: Arc<CoordinatorDirectory>, options: AppOptions) -> Self {
        Self {
            session: SwipeSession::new(directory).for_user(options.user.id.clone()),
            gesture: GestureInterpreter::new(options.thresholds),
            overlay: Overlay::None,
            user: options.user,
            auto_dismiss: options.auto_dismiss,
            drag_target: None,
        }
    }

    pub fn response(&self) -> IntentResponse {
        IntentResponse {
            snapshot: self.session.snapshot(),
            overlay: self.overlay.kind(),
            user: self.user.clone(),
            match_event: None,
            feedback: None,
            notice: None,
        }
    }

    /// Drop any drag in progress along with the card it was aimed at
    fn cancel_drag(&mut self) {
        self.gesture.pointer_cancel();
        self.drag_target = None;
    }

    fn pointer(&mut self, event: PointerEvent, now: Instant) -> Outcome {
        if !self.overlay.accepts_swipes() {
            self.cancel_drag();
            return Outcome {
                notice: Some(Notice::Blocked { overlay: self.overlay.kind() }),
                ..Outcome::default()
            };
        }

        if let PointerEvent::Down { .. } = event {
            self.drag_target = self.session.current().map(|c| c.id.clone());
        }

        match self.gesture.handle(event) {
            GestureOutcome::Dragging(drag) => Outcome {
                feedback: Some(drag),
                ..Outcome::default()
            },
            GestureOutcome::Commit(direction) => {
                let target = self.drag_target.take();
                self.swipe(target.as_deref(), direction, now)
            }
            GestureOutcome::Abandoned => {
                self.drag_target = None;
                Outcome::default()
            }
            GestureOutcome::Idle => Outcome::default(),
        }
    }

    /// Decide on `target`, or on the card shown when no target is given
    fn swipe(&mut self, target: Option<&str>, direction: SwipeDirection, now: Instant) -> Outcome {
        if !self.overlay.accepts_swipes() {
            return Outcome {
                notice: Some(Notice::Blocked { overlay: self.overlay.kind() }),
                ..Outcome::default()
            };
        }

        let decided = match target {
            Some(id) => self.session.record_decision(id, direction),
            None => self.session.decide_current(direction),
        };

        match decided {
            Ok(Some(event)) => {
                let auto_dismiss = self
                    .auto_dismiss
                    .map(|after| DismissTimer::starting_at(now, after));
                self.overlay.open(Overlay::MatchModal {
                    coordinator_id: event.coordinator.id.clone(),
                    auto_dismiss,
                });
                Outcome {
                    match_event: Some(event),
                    ..Outcome::default()
                }
            }
            Ok(None) => Outcome::default(),
            Err(rejected) => {
                tracing::debug!("Decision rejected: {}", rejected);
                Outcome {
                    notice: Some(Notice::Rejected { reason: rejected.to_string() }),
                    ..Outcome::default()
                }
            }
        }
    }
}

/// Per-intent additions to the state snapshot
#[derive(Debug, Default)]
struct Outcome {
    match_event: Option<MatchEvent>,
    feedback: Option<DragFeedback>,
    notice: Option<Notice>,
}

/// Apply one intent and report the resulting state
///
/// The match modal timer is checked first, so a stale modal never
/// blocks input that arrives after its deadline.
pub fn dispatch(state: &mut AppState, intent: Intent, now: Instant) -> IntentResponse {
    state.overlay.tick(now);

    let mut outcome = Outcome::default();

    tracing::trace!("Dispatching {:?}", intent);

    match intent {
        Intent::OpenFilter => {
            state.cancel_drag();
            state.overlay.open(Overlay::FilterPanel);
        }
        Intent::ApplyFilter(request) => match request.validate() {
            Ok(()) => {
                state.cancel_drag();
                state.session.apply_filter(request.to_criteria());
                if state.overlay == Overlay::FilterPanel {
                    state.overlay.close();
                }
            }
            Err(errors) => {
                tracing::info!("Validation failed for filter request: {:?}", errors);
                outcome.notice = Some(Notice::Invalid { message: errors.to_string() });
            }
        },
        Intent::ClearFilter => {
            state.cancel_drag();
            state.session.clear_filter();
        }
        Intent::CloseOverlay => state.overlay.close(),
        Intent::Skip => outcome = state.swipe(None, SwipeDirection::Left, now),
        Intent::Match => outcome = state.swipe(None, SwipeDirection::Right, now),
        Intent::Pointer { event } => outcome = state.pointer(event, now),
        Intent::OpenMenu => {
            state.cancel_drag();
            state.overlay.open(Overlay::Menu);
        }
        Intent::OpenMatchList => {
            state.cancel_drag();
            state.overlay.open(Overlay::MatchList);
        }
        Intent::OpenSettings => {
            state.cancel_drag();
            state.overlay.open(Overlay::Settings);
        }
        Intent::OpenProfile { coordinator_id } => {
            let target = coordinator_id
                .or_else(|| state.session.current().map(|c| c.id.clone()))
                .filter(|id| state.session.directory().get(id).is_some());

            match target {
                Some(coordinator_id) => {
                    state.cancel_drag();
                    state.overlay.open(Overlay::ProfileDetail { coordinator_id });
                }
                None => {
                    outcome.notice = Some(Notice::Rejected {
                        reason: "No such coordinator to show".to_string(),
                    });
                }
            }
        }
        Intent::UpdateSettings(request) => {
            let request = request.normalized();
            match request.validate() {
                Ok(()) => {
                    tracing::info!("User settings updated");
                    state.user.name = request.name;
                    state.user.role = request.role;
                }
                Err(errors) => {
                    tracing::info!("Validation failed for settings request: {:?}", errors);
                    outcome.notice = Some(Notice::Invalid { message: errors.to_string() });
                }
            }
        }
        Intent::StartChat => {
            state.overlay.dismiss_match();
            outcome.notice = Some(Notice::ComingSoon { feature: "chat".to_string() });
        }
        Intent::MakeCall => {
            state.overlay.dismiss_match();
            outcome.notice = Some(Notice::ComingSoon { feature: "call".to_string() });
        }
        Intent::DismissMatch => {
            state.overlay.dismiss_match();
        }
        Intent::Tick | Intent::Snapshot => {}
    }

    IntentResponse {
        match_event: outcome.match_event,
        feedback: outcome.feedback,
        notice: outcome.notice,
        ..state.response()
    }
}

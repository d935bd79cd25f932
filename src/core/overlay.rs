use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Auto-close deadline for the match celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTimer {
    deadline: Instant,
}

impl DismissTimer {
    pub fn starting_at(now: Instant, after: Duration) -> Self {
        Self {
            deadline: now + after,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

/// The single screen-level layer on top of the swipe view
///
/// At most one overlay is open at a time; swipes are only accepted when
/// nothing is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    FilterPanel,
    Menu,
    MatchList,
    Settings,
    ProfileDetail {
        coordinator_id: String,
    },
    MatchModal {
        coordinator_id: String,
        auto_dismiss: Option<DismissTimer>,
    },
}

/// Serializable tag of the open overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    None,
    FilterPanel,
    Menu,
    MatchList,
    Settings,
    ProfileDetail,
    MatchModal,
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::None => OverlayKind::None,
            Self::FilterPanel => OverlayKind::FilterPanel,
            Self::Menu => OverlayKind::Menu,
            Self::MatchList => OverlayKind::MatchList,
            Self::Settings => OverlayKind::Settings,
            Self::ProfileDetail { .. } => OverlayKind::ProfileDetail,
            Self::MatchModal { .. } => OverlayKind::MatchModal,
        }
    }

    pub fn accepts_swipes(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Open `next` if allowed from the current overlay.
    ///
    /// Anything opens from the bare swipe view. The menu hands over to
    /// the screens it links to; the match list hands over to a profile.
    /// Returns whether the overlay changed.
    pub fn open(&mut self, next: Overlay) -> bool {
        let allowed = match (&*self, &next) {
            (_, Self::None) => true,
            (Self::None, _) => true,
            (Self::Menu, Self::MatchList | Self::Settings) => true,
            (Self::MatchList, Self::ProfileDetail { .. }) => true,
            _ => false,
        };

        if allowed {
            tracing::debug!("Overlay {:?} -> {:?}", self.kind(), next.kind());
            *self = next;
        } else {
            tracing::debug!("Overlay {:?} refused while {:?} is open", next.kind(), self.kind());
        }
        allowed
    }

    pub fn close(&mut self) {
        *self = Self::None;
    }

    /// Close the match modal, manually or by timer. No-op otherwise.
    pub fn dismiss_match(&mut self) -> bool {
        if matches!(self, Self::MatchModal { .. }) {
            self.close();
            true
        } else {
            false
        }
    }

    /// Fire the auto-dismiss timer if it is due. Returns whether the
    /// modal was closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = match self {
            Self::MatchModal {
                auto_dismiss: Some(timer),
                ..
            } => timer.is_expired(now),
            _ => false,
        };

        if due {
            tracing::debug!("Match modal auto-dismissed");
            self.close();
        }
        due
    }
}

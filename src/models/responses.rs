use serde::{Deserialize, Serialize};

use super::domain::{CoordinatorRecord, MatchEvent, UserSettings};
use crate::core::gesture::DragFeedback;
use crate::core::overlay::OverlayKind;

/// Selected labels per dimension, for the active-filter banner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    #[serde(rename = "serviceType")]
    pub service_types: Vec<String>,
    #[serde(rename = "supportMenus")]
    pub support_menus: Vec<String>,
    #[serde(rename = "availableTimes")]
    pub available_times: Vec<String>,
}

/// 1-based card indicator ("2 / 5")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePosition {
    pub index: usize,
    pub total: usize,
}

/// Everything the presentation layer reads after a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub queue: Vec<String>,
    pub cursor: usize,
    pub current: Option<CoordinatorRecord>,
    #[serde(rename = "nextId")]
    pub next_id: Option<String>,
    pub position: Option<QueuePosition>,
    pub exhausted: bool,
    pub matches: Vec<String>,
    pub filters: FilterSummary,
    #[serde(rename = "filtersActive")]
    pub filters_active: bool,
}

/// Side messages for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// A decision was refused and state is unchanged
    Rejected { reason: String },
    /// Swipe input arrived while an overlay was open
    Blocked { overlay: OverlayKind },
    /// Request failed validation
    Invalid { message: String },
    /// Feature placeholder (chat, phone)
    ComingSoon { feature: String },
}

/// Reply to every dispatched intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub snapshot: SessionSnapshot,
    pub overlay: OverlayKind,
    pub user: UserSettings,
    #[serde(rename = "matchEvent", skip_serializing_if = "Option::is_none")]
    pub match_event: Option<MatchEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<DragFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

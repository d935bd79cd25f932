// Model exports
pub mod criteria;
pub mod domain;
pub mod requests;
pub mod responses;

pub use criteria::{Criterion, FilterCriteria};
pub use domain::{
    AvailableTime, CoordinatorRecord, DecisionState, MatchEvent, MatchRecord, ServiceType,
    SupportMenu, SwipeDirection, Tag, TimeSlot, UnknownTag, UserRole, UserSettings,
    DEFAULT_USER_ID,
};
pub use requests::{ApplyFilterRequest, UpdateSettingsRequest};
pub use responses::{FilterSummary, IntentResponse, Notice, QueuePosition, SessionSnapshot};

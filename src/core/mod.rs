// Core state machine exports
pub mod display;
pub mod filters;
pub mod gesture;
pub mod overlay;
pub mod session;

pub use filters::{filter_catalog, is_visible, queue_positions};
pub use gesture::{
    DragFeedback, GestureInterpreter, GestureOutcome, GestureThresholds, PointerEvent,
};
pub use overlay::{DismissTimer, Overlay, OverlayKind};
pub use session::{DecisionRejected, SwipeSession};

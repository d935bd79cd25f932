//! Orange Connect - swipe, filter and match core for a caregiving-coordinator app
//!
//! This library holds the state machine behind the swipe screen: the
//! filter predicate over coordinator attributes, the queue and cursor
//! that decide which card is shown next, and the gesture pipeline that
//! turns a drag into a skip or a match request.

pub mod config;
pub mod core;
pub mod intents;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{filter_catalog, GestureInterpreter, Overlay, SwipeSession};
pub use intents::{dispatch, AppState, Intent};
pub use models::{CoordinatorRecord, FilterCriteria, MatchEvent, SwipeDirection};
pub use services::CoordinatorDirectory;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let directory = CoordinatorDirectory::builtin();
        let visible =
            filter_catalog(directory.records(), &Default::default(), &FilterCriteria::none());
        assert_eq!(visible.len(), directory.len());
    }
}

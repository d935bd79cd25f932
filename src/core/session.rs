use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::core::filters::queue_positions;
use crate::models::{
    CoordinatorRecord, DecisionState, FilterCriteria, MatchEvent, MatchRecord, QueuePosition,
    SessionSnapshot, SwipeDirection, DEFAULT_USER_ID,
};
use crate::services::CoordinatorDirectory;

/// Why a decision was refused. State is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionRejected {
    #[error("Unknown coordinator: {0}")]
    UnknownCoordinator(String),

    #[error("Coordinator {0} has already been decided")]
    AlreadyDecided(String),

    #[error("Coordinator {0} is not the card currently shown")]
    NotCurrent(String),

    #[error("No coordinators left in the queue")]
    Exhausted,
}

/// Swipe session over a shared catalog
///
/// Transitions per coordinator are one-way: undecided -> skipped or
/// undecided -> matched. The visible queue is recomputed inside every
/// mutating call, so readers never see stale derived state.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    directory: Arc<CoordinatorDirectory>,
    user_id: String,
    criteria: FilterCriteria,
    decided: HashSet<String>,
    matches: Vec<MatchRecord>,
    queue: Vec<usize>,
    cursor: usize,
}

impl SwipeSession {
    pub fn new(directory: Arc<CoordinatorDirectory>) -> Self {
        let mut session = Self {
            directory,
            user_id: DEFAULT_USER_ID.to_string(),
            criteria: FilterCriteria::none(),
            decided: HashSet::new(),
            matches: Vec::new(),
            queue: Vec::new(),
            cursor: 0,
        };
        session.refresh();
        session
    }

    /// Attribute match records to the given user
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn directory(&self) -> &CoordinatorDirectory {
        &self.directory
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.is_active()
    }

    pub fn decided(&self) -> &HashSet<String> {
        &self.decided
    }

    /// Match history in decision order
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Matched coordinators in decision order
    pub fn matched_coordinators(&self) -> Vec<&CoordinatorRecord> {
        self.matches
            .iter()
            .filter_map(|m| self.directory.get(&m.coordinator_id))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> impl Iterator<Item = &CoordinatorRecord> + '_ {
        self.queue.iter().filter_map(|&position| self.directory.at(position))
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Card on display, or `None` once the queue is exhausted
    pub fn current(&self) -> Option<&CoordinatorRecord> {
        self.queue
            .get(self.cursor)
            .and_then(|&position| self.directory.at(position))
    }

    /// Card shown behind the current one
    pub fn peek_next(&self) -> Option<&CoordinatorRecord> {
        self.queue
            .get(self.cursor + 1)
            .and_then(|&position| self.directory.at(position))
    }

    pub fn position(&self) -> Option<QueuePosition> {
        self.current().map(|_| QueuePosition {
            index: self.cursor + 1,
            total: self.queue.len(),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    pub fn status(&self, coordinator_id: &str) -> DecisionState {
        if self.matches.iter().any(|m| m.coordinator_id == coordinator_id) {
            DecisionState::Matched
        } else if self.decided.contains(coordinator_id) {
            DecisionState::Skipped
        } else {
            DecisionState::Undecided
        }
    }

    /// Record a swipe on the card currently shown
    ///
    /// A right swipe appends to the match history and returns the event
    /// for the celebration screen. The cursor always goes back to the
    /// head of the remaining queue.
    pub fn record_decision(
        &mut self,
        coordinator_id: &str,
        direction: SwipeDirection,
    ) -> Result<Option<MatchEvent>, DecisionRejected> {
        let coordinator = self
            .directory
            .get(coordinator_id)
            .ok_or_else(|| DecisionRejected::UnknownCoordinator(coordinator_id.to_string()))?
            .clone();

        if self.decided.contains(coordinator_id) {
            return Err(DecisionRejected::AlreadyDecided(coordinator_id.to_string()));
        }

        match self.current() {
            Some(current) if current.id == coordinator_id => {}
            _ => return Err(DecisionRejected::NotCurrent(coordinator_id.to_string())),
        }

        self.decided.insert(coordinator.id.clone());

        let event = if direction.is_match() {
            let record = MatchRecord::new(coordinator.id.clone(), self.user_id.clone());
            self.matches.push(record.clone());
            tracing::info!(
                "Matched with coordinator {} ({}), {} matches so far",
                coordinator.id,
                coordinator.name,
                self.matches.len()
            );
            Some(MatchEvent { record, coordinator })
        } else {
            tracing::debug!("Skipped coordinator {}", coordinator.id);
            None
        };

        self.refresh();
        Ok(event)
    }

    /// Button path: decide on whatever card is shown
    pub fn decide_current(
        &mut self,
        direction: SwipeDirection,
    ) -> Result<Option<MatchEvent>, DecisionRejected> {
        let id = self
            .current()
            .map(|c| c.id.clone())
            .ok_or(DecisionRejected::Exhausted)?;
        self.record_decision(&id, direction)
    }

    /// Replace the criteria wholesale
    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
        tracing::info!(
            "Filter applied: {:?}, {} coordinators visible",
            self.criteria.summary(),
            self.queue.len()
        );
    }

    pub fn clear_filter(&mut self) {
        self.criteria = FilterCriteria::none();
        self.refresh();
        tracing::info!("Filter cleared, {} coordinators visible", self.queue.len());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            queue: self.queue().map(|c| c.id.clone()).collect(),
            cursor: self.cursor,
            current: self.current().cloned(),
            next_id: self.peek_next().map(|c| c.id.clone()),
            position: self.position(),
            exhausted: self.is_exhausted(),
            matches: self.matches.iter().map(|m| m.coordinator_id.clone()).collect(),
            filters: self.criteria.summary(),
            filters_active: self.criteria.is_active(),
        }
    }

    fn refresh(&mut self) {
        self.queue = queue_positions(self.directory.records(), &self.decided, &self.criteria);
        self.cursor = 0;
        tracing::trace!("Queue recomputed: {} visible", self.queue.len());
    }
}

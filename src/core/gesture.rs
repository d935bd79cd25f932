use serde::{Deserialize, Serialize};

use crate::models::SwipeDirection;

/// Offsets beyond which a drag hints at or commits to a direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// |offset| above this on release commits the swipe
    pub commit: f64,
    /// |offset| above this while dragging shows the direction hint
    pub hint: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            commit: 100.0,
            hint: 50.0,
        }
    }
}

/// Unified mouse/touch input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up,
    Cancel,
}

/// Visual feedback for the card under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragFeedback {
    pub offset: f64,
    pub hint: Option<SwipeDirection>,
    pub opacity: f64,
    /// Degrees
    pub rotation: f64,
}

impl DragFeedback {
    fn at(offset: f64, thresholds: &GestureThresholds) -> Self {
        Self {
            offset,
            hint: direction_of(offset).filter(|_| offset.abs() > thresholds.hint),
            opacity: (1.0 - offset.abs() / 200.0).max(0.7),
            rotation: offset * 0.05,
        }
    }
}

/// What a pointer event resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No drag in progress, event ignored
    Idle,
    Dragging(DragFeedback),
    Commit(SwipeDirection),
    Abandoned,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    origin_x: f64,
    current_x: f64,
}

impl DragState {
    fn offset(&self) -> f64 {
        self.current_x - self.origin_x
    }
}

/// Turns pointer-down / move / up sequences into at most one swipe
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    thresholds: GestureThresholds,
    drag: Option<DragState>,
}

impl GestureInterpreter {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn offset(&self) -> f64 {
        self.drag.map(|d| d.offset()).unwrap_or(0.0)
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Down { x } => self.pointer_down(x),
            PointerEvent::Move { x } => self.pointer_move(x),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    pub fn pointer_down(&mut self, x: f64) -> GestureOutcome {
        self.drag = Some(DragState {
            origin_x: x,
            current_x: x,
        });
        GestureOutcome::Dragging(DragFeedback::at(0.0, &self.thresholds))
    }

    pub fn pointer_move(&mut self, x: f64) -> GestureOutcome {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.current_x = x;
                GestureOutcome::Dragging(DragFeedback::at(drag.offset(), &self.thresholds))
            }
            None => GestureOutcome::Idle,
        }
    }

    /// Release: commit when the final offset clears the threshold
    pub fn pointer_up(&mut self) -> GestureOutcome {
        let Some(drag) = self.drag.take() else {
            return GestureOutcome::Idle;
        };

        let offset = drag.offset();
        if offset.abs() > self.thresholds.commit {
            match direction_of(offset) {
                Some(direction) => {
                    tracing::debug!("Drag committed {:?} at offset {}", direction, offset);
                    GestureOutcome::Commit(direction)
                }
                None => GestureOutcome::Abandoned,
            }
        } else {
            tracing::trace!("Drag abandoned at offset {}", offset);
            GestureOutcome::Abandoned
        }
    }

    pub fn pointer_cancel(&mut self) -> GestureOutcome {
        match self.drag.take() {
            Some(_) => GestureOutcome::Abandoned,
            None => GestureOutcome::Idle,
        }
    }
}

fn direction_of(offset: f64) -> Option<SwipeDirection> {
    if offset > 0.0 {
        Some(SwipeDirection::Right)
    } else if offset < 0.0 {
        Some(SwipeDirection::Left)
    } else {
        None
    }
}

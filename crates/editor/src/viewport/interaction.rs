//! Pointer state machine: telling a click from a drag and owning the drag.

use glam::Vec3;
use serde::Serialize;
use shared::ObjectId;

use super::camera::ScreenPos;

/// Object under the pointer at press time
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTarget {
    pub object: ObjectId,
    /// Floor hit minus object position, kept constant while dragging
    pub grab_offset: Vec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pressed on an object, not yet moved past the threshold
    Armed {
        object: ObjectId,
        down_pos: ScreenPos,
        down_ms: u64,
        grab_offset: Vec3,
    },
    Dragging {
        object: ObjectId,
        grab_offset: Vec3,
    },
}

/// What the session has to do after a pointer event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "object", rename_all = "snake_case")]
pub enum InteractionOutcome {
    Nothing,
    /// Press landed on an object; select it
    Armed(ObjectId),
    /// Move the object under the pointer
    Drag {
        object: ObjectId,
        #[serde(skip)]
        grab_offset: Vec3,
        /// First move of this drag; camera controls go off
        started: bool,
    },
    /// Drag finished; camera controls come back
    DragEnded(ObjectId),
    Click(ObjectId),
    /// Long press without movement
    Released(ObjectId),
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    drag_threshold_px: f32,
    click_max_ms: u64,
}

impl InteractionController {
    pub fn new(drag_threshold_px: f32, click_max_ms: u64) -> Self {
        Self {
            state: InteractionState::Idle,
            drag_threshold_px,
            click_max_ms,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn pointer_down(
        &mut self,
        target: Option<PointerTarget>,
        pos: ScreenPos,
        time_ms: u64,
    ) -> InteractionOutcome {
        match target {
            Some(PointerTarget { object, grab_offset }) => {
                self.state = InteractionState::Armed {
                    object: object.clone(),
                    down_pos: pos,
                    down_ms: time_ms,
                    grab_offset,
                };
                InteractionOutcome::Armed(object)
            }
            None => {
                self.state = InteractionState::Idle;
                InteractionOutcome::Nothing
            }
        }
    }

    pub fn pointer_move(&mut self, pos: ScreenPos) -> InteractionOutcome {
        match &self.state {
            InteractionState::Idle => InteractionOutcome::Nothing,
            InteractionState::Armed {
                object,
                down_pos,
                grab_offset,
                ..
            } => {
                if down_pos.distance(pos) <= self.drag_threshold_px {
                    return InteractionOutcome::Nothing;
                }
                let object = object.clone();
                let grab_offset = *grab_offset;
                tracing::debug!(%object, "drag started");
                self.state = InteractionState::Dragging {
                    object: object.clone(),
                    grab_offset,
                };
                InteractionOutcome::Drag {
                    object,
                    grab_offset,
                    started: true,
                }
            }
            InteractionState::Dragging {
                object,
                grab_offset,
            } => InteractionOutcome::Drag {
                object: object.clone(),
                grab_offset: *grab_offset,
                started: false,
            },
        }
    }

    pub fn pointer_up(&mut self, time_ms: u64) -> InteractionOutcome {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => InteractionOutcome::Nothing,
            InteractionState::Armed {
                object, down_ms, ..
            } => {
                if time_ms.saturating_sub(down_ms) < self.click_max_ms {
                    InteractionOutcome::Click(object)
                } else {
                    InteractionOutcome::Released(object)
                }
            }
            InteractionState::Dragging { object, .. } => {
                tracing::debug!(%object, "drag ended");
                InteractionOutcome::DragEnded(object)
            }
        }
    }

    /// Abort whatever is in progress. Returns true if a drag was cut short.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = InteractionState::Idle;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: &str) -> Option<PointerTarget> {
        Some(PointerTarget {
            object: id.to_string(),
            grab_offset: Vec3::new(0.1, 0.0, -0.2),
        })
    }

    #[test]
    fn short_press_is_click() {
        let mut c = InteractionController::new(5.0, 200);
        c.pointer_down(target("a"), ScreenPos::new(100.0, 100.0), 1000);
        assert_eq!(c.pointer_move(ScreenPos::new(103.0, 103.0)), InteractionOutcome::Nothing);
        assert_eq!(c.pointer_up(1150), InteractionOutcome::Click("a".into()));
        assert_eq!(c.state(), &InteractionState::Idle);
    }

    #[test]
    fn long_press_is_release() {
        let mut c = InteractionController::new(5.0, 200);
        c.pointer_down(target("a"), ScreenPos::new(100.0, 100.0), 1000);
        assert_eq!(c.pointer_up(1200), InteractionOutcome::Released("a".into()));
    }

    #[test]
    fn threshold_starts_drag_once() {
        let mut c = InteractionController::new(5.0, 200);
        c.pointer_down(target("a"), ScreenPos::new(100.0, 100.0), 0);
        match c.pointer_move(ScreenPos::new(106.0, 100.0)) {
            InteractionOutcome::Drag { started, grab_offset, .. } => {
                assert!(started);
                assert_eq!(grab_offset, Vec3::new(0.1, 0.0, -0.2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            c.pointer_move(ScreenPos::new(120.0, 100.0)),
            InteractionOutcome::Drag { started: false, .. }
        ));
        assert_eq!(c.pointer_up(50), InteractionOutcome::DragEnded("a".into()));
    }

    #[test]
    fn press_on_nothing_stays_idle() {
        let mut c = InteractionController::new(5.0, 200);
        assert_eq!(c.pointer_down(None, ScreenPos::default(), 0), InteractionOutcome::Nothing);
        assert_eq!(c.pointer_move(ScreenPos::new(50.0, 50.0)), InteractionOutcome::Nothing);
        assert_eq!(c.pointer_up(10), InteractionOutcome::Nothing);
    }

    #[test]
    fn cancel_reports_drag() {
        let mut c = InteractionController::new(5.0, 200);
        c.pointer_down(target("a"), ScreenPos::default(), 0);
        c.pointer_move(ScreenPos::new(10.0, 0.0));
        assert!(c.cancel());
        assert!(!c.cancel());
    }
}

//! Input model: pointer targets, buttons, selection, and the drag gesture state.
//!
//! `PointerTarget` carries what the host knows about the DOM node under the
//! pointer, so background clicks can be told apart from clicks on children.
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up; it stands in for the move/up listeners a browser host installs
//! on the document while a drag is running.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{ElementId, ElementTag};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What the pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The canvas container itself, i.e. empty background.
    CanvasRoot,
    /// A rendered element.
    Element(ElementId),
    /// Anything else inside the canvas (overlays, hints, panel chrome).
    Other,
}

/// How a pointer-down on an element that is not yet selected behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPolicy {
    /// Select on the first press; dragging needs a second press.
    #[default]
    SelectFirst,
    /// Select and start dragging in the same press.
    Immediate,
}

/// Weak reference to the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: ElementId,
    pub tag: ElementTag,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Screen position of the pointer at pointer-down.
        start_screen: Point,
        /// Element position at pointer-down.
        start_world: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the element being dragged, if any.
    #[must_use]
    pub fn dragged_id(&self) -> Option<ElementId> {
        match self {
            Self::Dragging { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }

    /// Element position for the current pointer location: the start
    /// position translated 1:1 by the pointer's screen delta.
    #[must_use]
    pub fn drag_target(&self, screen: Point) -> Option<(ElementId, Point)> {
        match self {
            Self::Dragging { id, start_screen, start_world } => Some((
                *id,
                Point::new(
                    start_world.x + (screen.x - start_screen.x),
                    start_world.y + (screen.y - start_screen.y),
                ),
            )),
            Self::Idle => None,
        }
    }
}

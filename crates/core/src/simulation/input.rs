//! Per-frame input intents
//!
//! The input layer (keyboard, mouse, key-repeat handling) lives outside this
//! crate. It condenses one frame of user input into an [`InputIntent`].

use serde::{Deserialize, Serialize};

/// Pointer position in grid coordinates and button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Column under the pointer
    pub x: i32,
    /// Row under the pointer
    pub y: i32,
    /// Primary button held
    pub pressed: bool,
}

/// Everything the user asked for during one frame.
///
/// Deltas may be any size; the controller clamps the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntent {
    /// Flip between running and paused
    pub pause_toggled: bool,
    /// Change to the hotspot count
    pub hotspot_delta: i32,
    /// Change to the fire power
    pub fire_power_delta: i32,
    /// Switch to the next palette
    pub cycle_palette: bool,
    /// Flip hotspot pinning
    pub pin_toggled: bool,
    /// Flip the help overlay
    pub help_toggled: bool,
    /// Pointer state, when the pointer is over the surface
    pub pointer: Option<PointerState>,
}

impl InputIntent {
    /// A frame with no input
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Pointer held down at `(x, y)`
    #[must_use]
    pub fn press_at(x: i32, y: i32) -> Self {
        Self {
            pointer: Some(PointerState {
                x,
                y,
                pressed: true,
            }),
            ..Self::default()
        }
    }

    /// The pointer position if the button is held
    #[must_use]
    pub fn pressed_pointer(&self) -> Option<(i32, i32)> {
        self.pointer
            .filter(|pointer| pointer.pressed)
            .map(|pointer| (pointer.x, pointer.y))
    }
}

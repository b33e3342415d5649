//! Animation state shared between the frame renderer and the input
//! controller.
//!
//! [`SpinState`] holds the rotation angle advanced once per drawn frame
//! and the camera depth offset mutated by key presses. Both are plain
//! scalars; all access happens on the event loop thread.

/// Rotation increment applied after each drawn frame, in radians.
pub const ROTATE_SPEED: f32 = 0.025;

/// Depth offset applied per key press.
pub const SHIFT_Z_STEP: f32 = 0.1;

/// Camera depth offset at startup.
pub const INITIAL_SHIFT_Z: f32 = -7.0;

/// Engine-level command produced by the input controller.
///
/// Platform key events are translated into these by
/// [`crate::app::input::translate_key`]; unrecognized keys produce no
/// command at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinCommand {
    /// Move the camera closer (decrease the z offset).
    ShiftIn,
    /// Move the camera away (increase the z offset).
    ShiftOut,
}

/// Mutable animation parameters.
///
/// The rotation angle increases monotonically; trigonometry makes the
/// wrap-around implicit, so no modulo is applied. The z offset is
/// unbounded by design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    /// Current z-rotation angle in radians. Only ever increases.
    pub angle: f32,
    /// Radians added per frame by [`advance`](Self::advance).
    pub rotate_speed: f32,
    /// Shared camera depth offset, applied to every mesh translation.
    pub z_shift: f32,
    /// Offset added or removed per [`SpinCommand`].
    pub shift_step: f32,
}

impl Default for SpinState {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            rotate_speed: ROTATE_SPEED,
            z_shift: INITIAL_SHIFT_Z,
            shift_step: SHIFT_Z_STEP,
        }
    }

    /// Advances the rotation by one frame step. Called by the frame
    /// renderer after both meshes have been drawn.
    pub fn advance(&mut self) {
        self.angle += self.rotate_speed;
    }

    /// Applies a single input command to the depth offset.
    pub fn apply(&mut self, command: SpinCommand) {
        match command {
            SpinCommand::ShiftIn => self.z_shift -= self.shift_step,
            SpinCommand::ShiftOut => self.z_shift += self.shift_step,
        }
    }
}

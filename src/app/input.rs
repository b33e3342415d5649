//! Winit input adapter.
//!
//! Translates raw key events into engine-level [`SpinCommand`]s. The
//! loop only distinguishes two keys; everything else is dropped here.

use winit::keyboard::{KeyCode, PhysicalKey};

use crate::spin::SpinCommand;

/// Maps a physical key to its command, if any. `W` moves the camera
/// closer, `S` moves it away.
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Option<SpinCommand> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    match code {
        KeyCode::KeyW => Some(SpinCommand::ShiftIn),
        KeyCode::KeyS => Some(SpinCommand::ShiftOut),
        _ => None,
    }
}

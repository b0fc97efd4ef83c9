use crate::dynamics::state::TickInput;
use crate::gnc::{Controller, ControlOutput, HunterController, SteeringError};

// ---------------------------------------------------------------------------
// Tick replay: feed a recorded input sequence through a controller
// ---------------------------------------------------------------------------

/// Replay recorded ticks through `controller`, stopping at the first fault.
/// Returns the outputs produced so far and the fault, if any.
pub fn replay_with(
    frames: &[TickInput],
    controller: &mut dyn Controller,
) -> (Vec<ControlOutput>, Option<(usize, SteeringError)>) {
    let mut outputs = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        match controller.control(frame) {
            Ok(out) => outputs.push(out),
            Err(e) => return (outputs, Some((i, e))),
        }
    }
    (outputs, None)
}

/// Replay with a fresh default HunterController (convenience wrapper).
pub fn replay(frames: &[TickInput]) -> (Vec<ControlOutput>, Option<(usize, SteeringError)>) {
    let mut controller = HunterController::default();
    replay_with(frames, &mut controller)
}

/// The same input repeated `n` times, as a fixed-step sequence.
pub fn hold_frames(input: &TickInput, n: usize) -> Vec<TickInput> {
    vec![input.clone(); n]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

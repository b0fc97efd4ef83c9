pub mod runner;

pub use runner::{hold_frames, replay, replay_with};

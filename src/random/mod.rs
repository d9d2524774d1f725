pub mod fill;
pub mod sequencer;

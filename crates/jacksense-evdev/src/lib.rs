//! Jacksense evdev - kernel input-event integration.
//!
//! This crate talks to the kernel's `/dev/input/event*` devices:
//! - locating the device that carries the headphone insertion switch,
//! - decoding its event stream, including recovery after the kernel drops
//!   events (`SYN_DROPPED`),
//! - tracking the three insertion switches and pushing availability to the
//!   host's port registry at every report boundary.

pub mod error;
pub mod locate;
pub mod source;
pub mod tracker;

pub use error::{EvdevError, EvdevResult};
pub use locate::{DEFAULT_INPUT_DIR, locate};
pub use source::{Decoded, EventSource, EvdevSource, ReadMode, ReadOutcome};
pub use tracker::SwitchTracker;

//! Jacksense Core - switch state and port availability logic.
//!
//! This crate contains the pure domain logic shared between the daemon and
//! the kernel integration layer: the tracked jack-detection switches, and
//! the rule that turns their combined state into per-port availability.

pub mod availability;
pub mod switch;

pub use availability::{Availability, HEADPHONE_PORTS, HEADSET_PORTS, PortRegistry, notify_ports};
pub use switch::{SwitchCode, SwitchState};

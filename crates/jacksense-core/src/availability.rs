//! Port availability computation and the host port registry seam.

use tracing::debug;

use crate::switch::SwitchState;

/// Availability of a named audio port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The port is known to be usable
    Yes,
    /// The port is known to be unusable
    No,
    /// Availability cannot be determined (never produced by jack detection)
    Unknown,
}

/// Ports driven by the headphone class: an output plug without a microphone
/// contact.
pub const HEADPHONE_PORTS: &[&str] = &["output-wired_headphone"];

/// Ports driven by the headset class: an output plug with a microphone
/// contact. The input port is listed last so hosts that switch to the most
/// recently available port end up on it.
pub const HEADSET_PORTS: &[&str] = &["output-wired_headset", "input-wired_headset"];

/// Host-owned collection of named ports.
///
/// The host owns the port objects; jack detection only looks them up by name
/// and writes an availability value. A name missing from the registry is not
/// an error - that port simply does not exist in the host's configuration.
pub trait PortRegistry {
    /// Opaque handle to a port, valid until the registry is next mutated.
    type Handle;

    /// Look up a port by name.
    fn lookup(&mut self, name: &str) -> Option<Self::Handle>;

    /// Set the availability of a previously looked-up port.
    fn set_available(&mut self, port: Self::Handle, value: Availability);
}

/// Push the availability derived from `state` to every registered port.
///
/// Exactly one of the two classes is `Yes` while an output plug is inserted;
/// the microphone contact picks which one. Both are `No` when nothing is
/// inserted. Pure function of the switch state - call it only at report
/// boundaries so listeners never observe a half-applied batch.
pub fn notify_ports<R: PortRegistry>(state: &SwitchState, ports: &mut R) {
    let has_headphone = if state.any_output_inserted() && !state.microphone_inserted {
        Availability::Yes
    } else {
        Availability::No
    };

    for name in HEADPHONE_PORTS {
        if let Some(port) = ports.lookup(name) {
            ports.set_available(port, has_headphone);
        }
    }

    let has_headset = if state.any_output_inserted() && state.microphone_inserted {
        Availability::Yes
    } else {
        Availability::No
    };

    for name in HEADSET_PORTS {
        if let Some(port) = ports.lookup(name) {
            ports.set_available(port, has_headset);
        }
    }

    debug!(?has_headphone, ?has_headset, "Notified port availability");
}

//! Switch state tracking over a decoded event source.

use std::os::unix::io::{AsRawFd, RawFd};

use jacksense_core::{PortRegistry, SwitchCode, SwitchState, notify_ports};
use tracing::{debug, error};

use crate::source::{Decoded, EventSource, ReadMode, ReadOutcome};

/// Tracks the three insertion switches of one event source.
///
/// The host invokes [`SwitchTracker::drain`] whenever the source's
/// descriptor is readable; each invocation runs to would-block without
/// blocking, so the host's readiness notification stays level-accurate.
pub struct SwitchTracker<S> {
    source: S,
    state: SwitchState,
}

impl<S: EventSource> SwitchTracker<S> {
    /// Wrap an open event source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source, state: SwitchState::default() }
    }

    /// Read the device's latched switch values and notify once.
    ///
    /// Call this once, before the first [`drain`](Self::drain): it makes
    /// port availability reflect plugs that were already inserted before
    /// monitoring started. A switch the device does not carry counts as
    /// not inserted.
    pub fn prime<R: PortRegistry>(&mut self, ports: &mut R) {
        for code in SwitchCode::ALL {
            let engaged = self.source.latched(code).unwrap_or(false);
            self.state.apply(code, engaged);
        }
        debug!(state = ?self.state, "Latched initial switch state");
        notify_ports(&self.state, ports);
    }

    /// Decode and apply every currently available event.
    ///
    /// Switch-class events update the tracked state; every `SYN_REPORT`
    /// boundary pushes the accumulated state to `ports`, so listeners only
    /// ever observe fully applied batches. When the kernel announces
    /// dropped events the tracker flips to resync mode, takes the source's
    /// one-shot snapshot, then resumes normal reads. Read failures other
    /// than would-block are logged and end the invocation; the source is
    /// left registered and may recover on the next readiness signal.
    pub fn drain<R: PortRegistry>(&mut self, ports: &mut R) {
        let mut mode = ReadMode::Normal;

        loop {
            match self.source.next_event(mode) {
                ReadOutcome::WouldBlock => {
                    if mode == ReadMode::Resync {
                        // Snapshot drained; live events may still be queued.
                        mode = ReadMode::Normal;
                    } else {
                        break;
                    }
                }
                ReadOutcome::Dropped => {
                    if mode == ReadMode::Normal {
                        mode = ReadMode::Resync;
                    }
                    // Otherwise we are already mid-resync; keep going.
                }
                ReadOutcome::Failed(e) => {
                    error!(error = %e, "Error reading event from switch device");
                    break;
                }
                ReadOutcome::Event(Decoded::Switch { code, engaged }) => {
                    self.state.apply(code, engaged);
                }
                ReadOutcome::Event(Decoded::Report) => {
                    notify_ports(&self.state, ports);
                }
                ReadOutcome::Event(Decoded::Other) => {}
            }
        }
    }

    /// Current tracked switch state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        self.state
    }
}

impl<S: AsRawFd> AsRawFd for SwitchTracker<S> {
    fn as_raw_fd(&self) -> RawFd {
        self.source.as_raw_fd()
    }
}

//! Decoded switch event sources.
//!
//! [`EventSource`] is the seam between the switch tracker and the kernel:
//! it hands out one decoded unit at a time in either normal or resync mode,
//! and answers capability and latched-value queries. [`EvdevSource`] is the
//! real implementation over a non-blocking `/dev/input/event*` device.

use std::collections::VecDeque;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use evdev::raw_stream::RawDevice;
use evdev::{InputEventKind, SwitchType, Synchronization};
use jacksense_core::SwitchCode;
use tracing::debug;

use crate::error::{EvdevError, EvdevResult};

/// Read mode for [`EventSource::next_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Deliver live events from the device buffer.
    Normal,
    /// Deliver a one-shot snapshot of every tracked switch, taken after the
    /// kernel announced dropped events, then report would-block.
    Resync,
}

/// One decoded unit from the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A tracked switch changed value.
    Switch { code: SwitchCode, engaged: bool },
    /// End of a coherent batch of changes (`SYN_REPORT`).
    Report,
    /// Anything else: unrecognized switches, keys, axes. Ignored upstream.
    Other,
}

/// Outcome of one read attempt.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A decoded unit was obtained.
    Event(Decoded),
    /// No event is currently available.
    WouldBlock,
    /// The kernel dropped events faster than they were consumed
    /// (`SYN_DROPPED`); the reader must switch to resync mode.
    Dropped,
    /// A read failure other than would-block.
    Failed(EvdevError),
}

/// Something that yields decoded switch events and answers switch queries.
pub trait EventSource {
    /// Fetch the next decoded unit in the given mode.
    fn next_event(&mut self, mode: ReadMode) -> ReadOutcome;

    /// Whether the device declares support for a switch at all.
    fn has_switch(&self, code: SwitchCode) -> bool;

    /// The device's currently latched value for a switch, or `None` if the
    /// device has no such switch.
    fn latched(&self, code: SwitchCode) -> Option<bool>;
}

/// An open, non-blocking kernel event device plus its decode state.
pub struct EvdevSource {
    // Field order is load-bearing for teardown: the decode queues drop
    // before `device`, whose drop closes the descriptor last.
    pending: VecDeque<Decoded>,
    snapshot: VecDeque<Decoded>,
    snapshot_taken: bool,
    path: PathBuf,
    device: RawDevice,
}

impl EvdevSource {
    /// Open an event device read-only and non-blocking.
    ///
    /// # Errors
    /// Returns an error if the device cannot be opened or is not a usable
    /// event device.
    pub fn open(path: &Path) -> EvdevResult<Self> {
        let device = RawDevice::open(path)
            .map_err(|source| EvdevError::Open { path: path.to_path_buf(), source })?;

        Ok(Self {
            pending: VecDeque::new(),
            snapshot: VecDeque::new(),
            snapshot_taken: false,
            path: path.to_path_buf(),
            device,
        })
    }

    /// Path this device was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kernel-reported device name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    fn next_normal(&mut self) -> ReadOutcome {
        if self.pending.is_empty() {
            match self.device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        if event.kind()
                            == InputEventKind::Synchronization(Synchronization::SYN_DROPPED)
                        {
                            // Everything buffered around the drop marker is
                            // stale; the resync snapshot supersedes it.
                            self.pending.clear();
                            self.snapshot_taken = false;
                            return ReadOutcome::Dropped;
                        }
                        self.pending.push_back(decode(event.kind(), event.value()));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                Err(e) => return ReadOutcome::Failed(EvdevError::Read(e)),
            }
        }

        match self.pending.pop_front() {
            Some(event) => ReadOutcome::Event(event),
            None => ReadOutcome::WouldBlock,
        }
    }

    fn next_resync(&mut self) -> ReadOutcome {
        if !self.snapshot_taken {
            let state = match self.device.get_switch_state() {
                Ok(state) => state,
                Err(e) => return ReadOutcome::Failed(EvdevError::Snapshot(e)),
            };
            self.snapshot_taken = true;
            for code in SwitchCode::ALL {
                let engaged = state.contains(kernel_switch(code));
                self.snapshot.push_back(Decoded::Switch { code, engaged });
            }
            self.snapshot.push_back(Decoded::Report);
            debug!(path = %self.path.display(), "Resynchronizing switch state after drop");
        }

        match self.snapshot.pop_front() {
            Some(event) => ReadOutcome::Event(event),
            None => {
                // Snapshot fully delivered; the next drop starts a new one.
                self.snapshot_taken = false;
                ReadOutcome::WouldBlock
            }
        }
    }
}

impl EventSource for EvdevSource {
    fn next_event(&mut self, mode: ReadMode) -> ReadOutcome {
        match mode {
            ReadMode::Normal => self.next_normal(),
            ReadMode::Resync => self.next_resync(),
        }
    }

    fn has_switch(&self, code: SwitchCode) -> bool {
        self.device
            .supported_switches()
            .is_some_and(|switches| switches.contains(kernel_switch(code)))
    }

    fn latched(&self, code: SwitchCode) -> Option<bool> {
        if !self.has_switch(code) {
            return None;
        }
        match self.device.get_switch_state() {
            Ok(state) => Some(state.contains(kernel_switch(code))),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Switch state query failed");
                None
            }
        }
    }
}

impl AsRawFd for EvdevSource {
    fn as_raw_fd(&self) -> RawFd {
        self.device.as_raw_fd()
    }
}

fn kernel_switch(code: SwitchCode) -> SwitchType {
    match code {
        SwitchCode::HeadphoneInsert => SwitchType::SW_HEADPHONE_INSERT,
        SwitchCode::MicrophoneInsert => SwitchType::SW_MICROPHONE_INSERT,
        SwitchCode::LineoutInsert => SwitchType::SW_LINEOUT_INSERT,
    }
}

fn decode(kind: InputEventKind, value: i32) -> Decoded {
    match kind {
        InputEventKind::Switch(SwitchType::SW_HEADPHONE_INSERT) => {
            Decoded::Switch { code: SwitchCode::HeadphoneInsert, engaged: value != 0 }
        }
        InputEventKind::Switch(SwitchType::SW_MICROPHONE_INSERT) => {
            Decoded::Switch { code: SwitchCode::MicrophoneInsert, engaged: value != 0 }
        }
        InputEventKind::Switch(SwitchType::SW_LINEOUT_INSERT) => {
            Decoded::Switch { code: SwitchCode::LineoutInsert, engaged: value != 0 }
        }
        InputEventKind::Synchronization(Synchronization::SYN_REPORT) => Decoded::Report,
        _ => Decoded::Other,
    }
}

//! Switch device discovery.
//!
//! Scans the input-device directory once at startup and picks the first
//! device, in version order, that declares the headphone insertion switch.
//! Finding nothing is a legitimate outcome - the machine simply has no such
//! hardware - so every failure here is absorbed and logged, never returned.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use jacksense_core::SwitchCode;
use tracing::{debug, info, warn};

use crate::source::{EvdevSource, EventSource};

/// Directory the kernel exposes event devices under.
pub const DEFAULT_INPUT_DIR: &str = "/dev/input";

/// Name prefix of event device nodes.
const EVENT_DEV_PREFIX: &str = "event";

/// Find the first event device that carries the headphone insertion switch.
///
/// Candidates are visited in version order (`event1`, `event2`, `event10`);
/// per-candidate open failures are logged and skipped. Returns `None` when
/// no candidate matches or the directory cannot be read at all.
#[must_use]
pub fn locate(dir: &Path) -> Option<EvdevSource> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot read input device directory");
            return None;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(EVENT_DEV_PREFIX))
        .collect();
    names.sort_by(|a, b| version_cmp(a, b));

    for name in names {
        let path = dir.join(&name);
        debug!(path = %path.display(), "Checking device for headphone switch");

        let source = match EvdevSource::open(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!(error = %e, "Unable to open device, ignored");
                continue;
            }
        };

        if source.has_switch(SwitchCode::HeadphoneInsert) {
            info!(
                path = %path.display(),
                name = source.name().unwrap_or("<unknown>"),
                "Found switch device"
            );
            return Some(source);
        }
        // Not it; the descriptor closes as `source` goes out of scope.
    }

    debug!(dir = %dir.display(), "No switch-capable event device found");
    None
}

/// Compare two names treating embedded digit runs as numbers, so that
/// `event2` sorts before `event10`.
fn version_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.as_bytes();
    let mut b = b.as_bytes();

    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let (na, rest_a) = take_number(a);
                    let (nb, rest_b) = take_number(b);
                    match na.cmp(&nb) {
                        Ordering::Equal => {
                            a = rest_a;
                            b = rest_b;
                        }
                        unequal => return unequal,
                    }
                } else {
                    match ca.cmp(&cb) {
                        Ordering::Equal => {
                            a = &a[1..];
                            b = &b[1..];
                        }
                        unequal => return unequal,
                    }
                }
            }
        }
    }
}

/// Split off a leading digit run as a number.
fn take_number(s: &[u8]) -> (u64, &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    let n = s[..end]
        .iter()
        .fold(0u64, |acc, c| acc.wrapping_mul(10).wrapping_add(u64::from(c - b'0')));
    (n, &s[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_order_is_numeric() {
        let mut names = vec!["event2", "event10", "event1"];
        names.sort_by(|a, b| version_cmp(a, b));
        assert_eq!(names, vec!["event1", "event2", "event10"]);
    }

    #[test]
    fn test_version_cmp_mixed_segments() {
        assert_eq!(version_cmp("event9", "event9"), Ordering::Equal);
        assert_eq!(version_cmp("event", "event0"), Ordering::Less);
        assert_eq!(version_cmp("event2a", "event2b"), Ordering::Less);
        assert_eq!(version_cmp("event12", "event3"), Ordering::Greater);
    }

    #[test]
    fn test_locate_missing_directory_is_absence() {
        assert!(locate(Path::new("/nonexistent-jacksense-test")).is_none());
    }

    #[test]
    fn test_locate_skips_unopenable_candidates() {
        // Regular files carry the right names but fail the evdev handshake;
        // the scan must skip them all and report absence.
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        for name in ["event0", "event1", "event10"] {
            std::fs::write(dir.path().join(name), b"").expect("Failed to create file");
        }
        std::fs::write(dir.path().join("mouse0"), b"").expect("Failed to create file");

        assert!(locate(dir.path()).is_none());
    }
}

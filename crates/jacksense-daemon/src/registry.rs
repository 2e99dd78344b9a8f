//! In-memory port registry.
//!
//! This daemon has no audio server to hand availability to, so it keeps the
//! ports itself and logs every transition. An embedding host would supply
//! its own [`PortRegistry`] wired to its port objects instead.

use jacksense_core::{Availability, HEADPHONE_PORTS, HEADSET_PORTS, PortRegistry};
use tracing::info;

struct Port {
    name: String,
    available: Availability,
}

/// Registry holding the daemon's fixed set of wired ports.
pub struct MemoryPortRegistry {
    ports: Vec<Port>,
}

impl MemoryPortRegistry {
    /// Create a registry seeded with every known wired port name.
    #[must_use]
    pub fn with_default_ports() -> Self {
        let ports = HEADPHONE_PORTS
            .iter()
            .chain(HEADSET_PORTS)
            .map(|name| Port { name: (*name).to_string(), available: Availability::Unknown })
            .collect();
        Self { ports }
    }

    /// Current availability of a port, if it exists.
    #[must_use]
    pub fn availability(&self, name: &str) -> Option<Availability> {
        self.ports.iter().find(|p| p.name == name).map(|p| p.available)
    }
}

impl PortRegistry for MemoryPortRegistry {
    type Handle = usize;

    fn lookup(&mut self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    fn set_available(&mut self, port: usize, value: Availability) {
        let port = &mut self.ports[port];
        if port.available != value {
            info!(port = %port.name, from = ?port.available, to = ?value, "Port availability changed");
            port.available = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_all_wired_ports() {
        let registry = MemoryPortRegistry::with_default_ports();
        for name in HEADPHONE_PORTS.iter().chain(HEADSET_PORTS) {
            assert_eq!(registry.availability(name), Some(Availability::Unknown));
        }
    }

    #[test]
    fn test_lookup_unknown_name() {
        let mut registry = MemoryPortRegistry::with_default_ports();
        assert!(registry.lookup("output-speaker").is_none());
    }

    #[test]
    fn test_set_available_updates_port() {
        let mut registry = MemoryPortRegistry::with_default_ports();
        let handle = registry.lookup("output-wired_headphone").expect("Port missing");
        registry.set_available(handle, Availability::Yes);
        assert_eq!(registry.availability("output-wired_headphone"), Some(Availability::Yes));
    }
}

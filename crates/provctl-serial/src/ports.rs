use std::path::{Path, PathBuf};

use tracing::debug;

/// Owned snapshot of the serial ports present on the system.
///
/// The list is never refreshed behind the caller's back: call
/// [`PortList::refresh`] to observe newly attached devices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    names: Vec<PathBuf>,
}

impl PortList {
    /// An empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan the system for serial ports.
    pub fn discover() -> Self {
        let names = discover_ports();
        debug!(count = names.len(), "discovered serial ports");
        Self { names }
    }

    /// Build a list from explicit device paths, keeping their order.
    pub fn from_names<I, P>(names: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Rebuild the list by scanning the system again.
    pub fn refresh(&mut self) -> usize {
        *self = Self::discover();
        self.names.len()
    }

    /// Number of ports in the snapshot.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no ports were found.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Device path at `index`.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.names.get(index).map(PathBuf::as_path)
    }

    /// Index of the port with the given path or file name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|path| {
            path.as_os_str() == name || path.file_name().is_some_and(|file| file == name)
        })
    }

    /// Iterate over the device paths.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.names.iter().map(PathBuf::as_path)
    }
}

fn discover_ports() -> Vec<PathBuf> {
    let ports = match serialport::available_ports() {
        Ok(ports) => ports,
        Err(err) => {
            debug!(%err, "serial port enumeration failed");
            return Vec::new();
        }
    };

    let mut names: Vec<PathBuf> = ports
        .into_iter()
        .map(|info| PathBuf::from(info.port_name))
        .collect();
    names.sort();
    names.dedup();
    names
}

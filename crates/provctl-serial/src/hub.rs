use std::collections::HashMap;

use tracing::debug;

use crate::config::SerialConfig;
use crate::error::{Result, SerialError};
use crate::ports::PortList;
use crate::tty::SerialPort;

/// Index-addressed access to the ports of a [`PortList`].
///
/// A hub owns its port snapshot and every port opened through it, so a port
/// index can only be open once at a time.
#[derive(Debug, Default)]
pub struct SerialHub {
    ports: PortList,
    open: HashMap<usize, SerialPort>,
}

impl SerialHub {
    /// Create a hub over a freshly discovered port list.
    pub fn new() -> Self {
        Self::with_ports(PortList::discover())
    }

    /// Create a hub over an explicit port list.
    pub fn with_ports(ports: PortList) -> Self {
        Self {
            ports,
            open: HashMap::new(),
        }
    }

    /// Rebuild the port list from the system.
    ///
    /// Refused while any port is open, since indices would shift under the
    /// open handles.
    pub fn init(&mut self) -> Result<usize> {
        if let Some(index) = self.open.keys().next() {
            return Err(SerialError::Busy(self.describe(*index)));
        }
        Ok(self.ports.refresh())
    }

    /// Replace the port list with an explicit snapshot.
    pub fn set_ports(&mut self, ports: PortList) -> Result<()> {
        if let Some(index) = self.open.keys().next() {
            return Err(SerialError::Busy(self.describe(*index)));
        }
        self.ports = ports;
        Ok(())
    }

    /// The current port snapshot.
    pub fn ports(&self) -> &PortList {
        &self.ports
    }

    /// Number of known ports.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Device path of the port at `index`.
    pub fn port_name(&self, index: usize) -> Result<String> {
        self.ports
            .get(index)
            .map(|path| path.display().to_string())
            .ok_or(SerialError::NoSuchPort {
                index,
                count: self.ports.len(),
            })
    }

    /// True if the port at `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains_key(&index)
    }

    /// Open the port at `index` with the given settings.
    ///
    /// Settings are validated first; an invalid configuration leaves the hub
    /// untouched.
    pub fn open(&mut self, index: usize, config: &SerialConfig) -> Result<()> {
        let config = config.validate()?;
        let path = self
            .ports
            .get(index)
            .ok_or(SerialError::NoSuchPort {
                index,
                count: self.ports.len(),
            })?
            .to_path_buf();

        if self.open.contains_key(&index) {
            return Err(SerialError::Busy(path.display().to_string()));
        }

        let port = SerialPort::open(&path, &config)?;
        self.open.insert(index, port);
        debug!(index, ?path, "port registered as open");
        Ok(())
    }

    /// Close the port at `index`, restoring its prior settings.
    pub fn close(&mut self, index: usize) -> Result<()> {
        let port = self.open.remove(&index).ok_or(SerialError::NotOpen(index))?;
        port.close()
    }

    /// Non-blocking read from the port at `index`.
    pub fn poll(&mut self, index: usize, buf: &mut [u8]) -> Result<usize> {
        self.port_mut(index)?.poll(buf)
    }

    /// Non-blocking write to the port at `index`.
    pub fn send(&mut self, index: usize, data: &[u8]) -> Result<usize> {
        self.port_mut(index)?.send(data)
    }

    fn port_mut(&mut self, index: usize) -> Result<&mut SerialPort> {
        self.open.get_mut(&index).ok_or(SerialError::NotOpen(index))
    }

    fn describe(&self, index: usize) -> String {
        self.ports
            .get(index)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("#{index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_name_out_of_range() {
        let hub = SerialHub::with_ports(PortList::from_names(["/dev/ttyS0"]));
        assert_eq!(hub.port_count(), 1);
        assert_eq!(hub.port_name(0).unwrap(), "/dev/ttyS0");
        assert!(matches!(
            hub.port_name(1),
            Err(SerialError::NoSuchPort { index: 1, count: 1 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_index_lookup() {
        let mut hub = SerialHub::with_ports(PortList::empty());
        let cfg = SerialConfig {
            baud: 1_200,
            ..SerialConfig::default()
        };
        assert!(matches!(
            hub.open(5, &cfg),
            Err(SerialError::InvalidConfig(_))
        ));
        assert_eq!(hub.port_count(), 0);
    }

    #[test]
    fn io_on_closed_index_fails() {
        let mut hub = SerialHub::with_ports(PortList::from_names(["/dev/ttyS0"]));
        let mut buf = [0u8; 4];
        assert!(matches!(hub.poll(0, &mut buf), Err(SerialError::NotOpen(0))));
        assert!(matches!(hub.send(0, b"x"), Err(SerialError::NotOpen(0))));
        assert!(matches!(hub.close(0), Err(SerialError::NotOpen(0))));
    }

    #[cfg(target_os = "linux")]
    mod pty {
        use super::*;
        use crate::config::{Parity, ALLOWED_BAUD_RATES, ALLOWED_DATA_BITS, ALLOWED_STOP_BITS};
        use crate::testing::Pty;

        #[test]
        fn second_open_of_same_index_is_busy() {
            let pty = Pty::open();
            let mut hub = SerialHub::with_ports(PortList::from_names([pty.slave_path()]));

            hub.open(0, &SerialConfig::default()).unwrap();
            assert!(hub.is_open(0));
            assert!(matches!(
                hub.open(0, &SerialConfig::default()),
                Err(SerialError::Busy(_))
            ));
            assert!(matches!(hub.init(), Err(SerialError::Busy(_))));

            hub.close(0).unwrap();
            assert!(!hub.is_open(0));
            hub.open(0, &SerialConfig::default()).unwrap();
        }

        #[test]
        fn all_valid_combinations_open_and_restore() {
            let pty = Pty::open();
            let observer = pty.open_observer();
            let before = observer.termios();
            let mut hub = SerialHub::with_ports(PortList::from_names([pty.slave_path()]));

            for &baud in &ALLOWED_BAUD_RATES {
                for &data_bits in &ALLOWED_DATA_BITS {
                    for parity in [Parity::None, Parity::Odd, Parity::Even] {
                        for &stop_bits in &ALLOWED_STOP_BITS {
                            let cfg = SerialConfig {
                                baud,
                                data_bits,
                                parity,
                                stop_bits,
                            };
                            hub.open(0, &cfg).unwrap();
                            hub.close(0).unwrap();
                            let after = observer.termios();
                            assert_eq!(after.c_cflag, before.c_cflag, "{cfg:?}");
                            assert_eq!(after.c_lflag, before.c_lflag, "{cfg:?}");
                        }
                    }
                }
            }
        }

        #[test]
        fn invalid_combination_leaves_state_untouched() {
            let pty = Pty::open();
            let mut hub = SerialHub::with_ports(PortList::from_names([pty.slave_path()]));
            let cfg = SerialConfig {
                stop_bits: 3,
                ..SerialConfig::default()
            };

            assert!(matches!(
                hub.open(0, &cfg),
                Err(SerialError::InvalidConfig(_))
            ));
            assert!(!hub.is_open(0));
            assert_eq!(hub.port_count(), 1);
        }
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SerialError};

/// Baud rate used when the caller leaves the field at zero.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Data bits used when the caller leaves the field at zero.
pub const DEFAULT_DATA_BITS: u8 = 8;

/// Stop bits used when the caller leaves the field at zero.
pub const DEFAULT_STOP_BITS: u8 = 1;

/// Baud rates the transport accepts.
pub const ALLOWED_BAUD_RATES: [u32; 5] = [9_600, 19_200, 38_400, 57_600, 115_200];

/// Character sizes the transport accepts.
pub const ALLOWED_DATA_BITS: [u8; 4] = [5, 6, 7, 8];

/// Stop bit counts the transport accepts.
pub const ALLOWED_STOP_BITS: [u8; 2] = [1, 2];

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl Parity {
    /// Decode the numeric parity code (0 = none, 1 = odd, 2 = even).
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Odd),
            2 => Ok(Self::Even),
            other => Err(SerialError::InvalidConfig(format!(
                "parity code {other} (expected 0, 1 or 2)"
            ))),
        }
    }

    /// Numeric parity code.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Odd => 1,
            Self::Even => 2,
        }
    }

    /// Short name used in `8N1`-style summaries.
    pub fn letter(self) -> char {
        match self {
            Self::None => 'N',
            Self::Odd => 'O',
            Self::Even => 'E',
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Odd => "odd",
            Self::Even => "even",
        };
        f.write_str(name)
    }
}

impl FromStr for Parity {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "n" => Ok(Self::None),
            "odd" | "o" => Ok(Self::Odd),
            "even" | "e" => Ok(Self::Even),
            other => Err(SerialError::InvalidConfig(format!("parity '{other}'"))),
        }
    }
}

/// Line settings for opening a serial port.
///
/// A zero in `baud`, `data_bits` or `stop_bits` selects the default
/// (115200 baud, 8 data bits, 1 stop bit). Parity defaults to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate. One of [`ALLOWED_BAUD_RATES`], or 0 for the default.
    pub baud: u32,
    /// Character size. One of [`ALLOWED_DATA_BITS`], or 0 for the default.
    pub data_bits: u8,
    /// Parity mode.
    pub parity: Parity,
    /// Stop bits. One of [`ALLOWED_STOP_BITS`], or 0 for the default.
    pub stop_bits: u8,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud: DEFAULT_BAUD,
            data_bits: DEFAULT_DATA_BITS,
            parity: Parity::None,
            stop_bits: DEFAULT_STOP_BITS,
        }
    }
}

impl SerialConfig {
    /// Settings with every field left unset.
    pub const fn unset() -> Self {
        Self {
            baud: 0,
            data_bits: 0,
            parity: Parity::None,
            stop_bits: 0,
        }
    }

    /// Replace zero fields with their defaults.
    pub fn resolved(&self) -> Self {
        Self {
            baud: if self.baud == 0 {
                DEFAULT_BAUD
            } else {
                self.baud
            },
            data_bits: if self.data_bits == 0 {
                DEFAULT_DATA_BITS
            } else {
                self.data_bits
            },
            parity: self.parity,
            stop_bits: if self.stop_bits == 0 {
                DEFAULT_STOP_BITS
            } else {
                self.stop_bits
            },
        }
    }

    /// Resolve defaults and check every field against its allowed set.
    pub fn validate(&self) -> Result<Self> {
        let resolved = self.resolved();

        if !ALLOWED_BAUD_RATES.contains(&resolved.baud) {
            return Err(SerialError::InvalidConfig(format!(
                "baud rate {} (allowed: {:?})",
                resolved.baud, ALLOWED_BAUD_RATES
            )));
        }
        if !ALLOWED_DATA_BITS.contains(&resolved.data_bits) {
            return Err(SerialError::InvalidConfig(format!(
                "data bits {} (allowed: {:?})",
                resolved.data_bits, ALLOWED_DATA_BITS
            )));
        }
        if !ALLOWED_STOP_BITS.contains(&resolved.stop_bits) {
            return Err(SerialError::InvalidConfig(format!(
                "stop bits {} (allowed: {:?})",
                resolved.stop_bits, ALLOWED_STOP_BITS
            )));
        }

        Ok(resolved)
    }
}

impl fmt::Display for SerialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.resolved();
        write!(
            f,
            "{} {}{}{}",
            r.baud,
            r.data_bits,
            r.parity.letter(),
            r.stop_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_115200_8n1() {
        let cfg = SerialConfig::default();
        assert_eq!(cfg.to_string(), "115200 8N1");
    }

    #[test]
    fn unset_fields_resolve_to_defaults() {
        let cfg = SerialConfig::unset().validate().unwrap();
        assert_eq!(cfg, SerialConfig::default());

        let partial = SerialConfig {
            baud: 9_600,
            ..SerialConfig::unset()
        };
        let resolved = partial.validate().unwrap();
        assert_eq!(resolved.baud, 9_600);
        assert_eq!(resolved.data_bits, 8);
        assert_eq!(resolved.stop_bits, 1);
    }

    #[test]
    fn every_allowed_combination_validates() {
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
                        assert_eq!(cfg.validate().unwrap(), cfg);
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_values_outside_allowed_sets() {
        let bad = [
            SerialConfig {
                baud: 4_800,
                ..SerialConfig::default()
            },
            SerialConfig {
                baud: 230_400,
                ..SerialConfig::default()
            },
            SerialConfig {
                data_bits: 9,
                ..SerialConfig::default()
            },
            SerialConfig {
                data_bits: 4,
                ..SerialConfig::default()
            },
            SerialConfig {
                stop_bits: 3,
                ..SerialConfig::default()
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(SerialError::InvalidConfig(_))),
                "{cfg:?} should be rejected"
            );
        }
    }

    #[test]
    fn parity_codes_and_names() {
        assert_eq!(Parity::from_code(0).unwrap(), Parity::None);
        assert_eq!(Parity::from_code(2).unwrap(), Parity::Even);
        assert!(Parity::from_code(3).is_err());
        assert_eq!("odd".parse::<Parity>().unwrap(), Parity::Odd);
        assert_eq!("E".parse::<Parity>().unwrap(), Parity::Even);
        assert!("mark".parse::<Parity>().is_err());
        assert_eq!(Parity::Odd.code(), 1);
    }
}

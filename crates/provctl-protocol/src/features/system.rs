use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Firmware version triple.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct VersionInfo {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl DeviceRecord for VersionInfo {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "version info";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [major, minor, patch] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            major: major as u16,
            minor: minor as u16,
            patch: patch as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.major.into(), self.minor.into(), self.patch.into()]
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Board temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Temperature {
    pub current: i16,
    /// Highest value since power-up.
    pub max: i16,
}

impl DeviceRecord for Temperature {
    const WIRE_FIELDS: usize = 2;
    const NAME: &'static str = "temperature";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [current, max] = *wire_fields::<2>(Self::NAME, fields)?;
        Ok(Self {
            current: current as i16,
            max: max as i16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.current.into(), self.max.into()]
    }
}

/// Device identity, health and settings persistence.
pub trait SystemOps: Send {
    fn get_version(&self, channel: &mut ControlChannel) -> Result<VersionInfo> {
        let _ = channel;
        unsupported(FeatureId::System, "get_version")
    }

    fn get_temperature(&self, channel: &mut ControlChannel) -> Result<Temperature> {
        let _ = channel;
        unsupported(FeatureId::System, "get_temperature")
    }

    /// Fan speed in percent.
    fn get_fan_speed(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::System, "get_fan_speed")
    }

    fn set_fan_speed(&self, channel: &mut ControlChannel, speed: u8) -> Result<()> {
        let _ = (channel, speed);
        unsupported(FeatureId::System, "set_fan_speed")
    }

    /// Operating time in seconds.
    fn get_runtime(&self, channel: &mut ControlChannel) -> Result<u32> {
        let _ = channel;
        unsupported(FeatureId::System, "get_runtime")
    }

    /// Interactive prompt on the device console (0 = off).
    fn get_prompt(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::System, "get_prompt")
    }

    fn set_prompt(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::System, "set_prompt")
    }

    fn get_debug_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::System, "get_debug_level")
    }

    fn set_debug_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        let _ = (channel, level);
        unsupported(FeatureId::System, "set_debug_level")
    }

    /// Persist the current settings to flash.
    fn save_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::System, "save_settings")
    }

    /// Reload the persisted settings.
    fn load_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::System, "load_settings")
    }

    /// Restore factory defaults.
    fn reset_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::System, "reset_settings")
    }

    fn reboot(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::System, "reboot")
    }
}

impl ControlProtocol {
    fn system(&self, operation: &'static str) -> Result<&dyn SystemOps> {
        match self.driver(FeatureId::System, operation)? {
            FeatureDriver::System(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::System, operation),
        }
    }

    pub fn get_version(&self, channel: &mut ControlChannel) -> Result<VersionInfo> {
        self.system("get_version")?.get_version(channel)
    }

    pub fn get_temperature(&self, channel: &mut ControlChannel) -> Result<Temperature> {
        self.system("get_temperature")?.get_temperature(channel)
    }

    pub fn get_fan_speed(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.system("get_fan_speed")?.get_fan_speed(channel)
    }

    pub fn set_fan_speed(&self, channel: &mut ControlChannel, speed: u8) -> Result<()> {
        self.system("set_fan_speed")?.set_fan_speed(channel, speed)
    }

    pub fn get_runtime(&self, channel: &mut ControlChannel) -> Result<u32> {
        self.system("get_runtime")?.get_runtime(channel)
    }

    pub fn get_prompt(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.system("get_prompt")?.get_prompt(channel)
    }

    pub fn set_prompt(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.system("set_prompt")?.set_prompt(channel, enable)
    }

    pub fn get_debug_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.system("get_debug_level")?.get_debug_level(channel)
    }

    pub fn set_debug_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.system("set_debug_level")?.set_debug_level(channel, level)
    }

    pub fn save_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.system("save_settings")?.save_settings(channel)
    }

    pub fn load_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.system("load_settings")?.load_settings(channel)
    }

    pub fn reset_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.system("reset_settings")?.reset_settings(channel)
    }

    pub fn reboot(&self, channel: &mut ControlChannel) -> Result<()> {
        self.system("reboot")?.reboot(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_numerically() {
        let old = VersionInfo::from_fields(&[1, 9, 3]).unwrap();
        let new = VersionInfo::from_fields(&[1, 10, 0]).unwrap();
        assert!(old < new);
        assert_eq!(new.to_string(), "1.10.0");
    }

    #[test]
    fn negative_temperatures_survive() {
        let temp = Temperature::from_fields(&[-12, 61]).unwrap();
        assert_eq!(temp.current, -12);
        assert_eq!(temp.to_fields(), vec![-12, 61]);
    }
}

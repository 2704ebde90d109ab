use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Zebra stripes over a luminance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZebraConfig {
    pub mode: u8,
    pub min: u16,
    pub max: u16,
}

impl DeviceRecord for ZebraConfig {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "zebra config";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [mode, min, max] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            mode: mode as u8,
            min: min as u16,
            max: max as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.mode.into(), self.min.into(), self.max.into()]
    }
}

/// On-screen display overlays.
pub trait OsdOps: Send {
    fn get_test_pattern(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Osd, "get_test_pattern")
    }

    fn set_test_pattern(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Osd, "set_test_pattern")
    }

    fn get_center_marker(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Osd, "get_center_marker")
    }

    fn set_center_marker(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Osd, "set_center_marker")
    }

    fn get_zebra(&self, channel: &mut ControlChannel) -> Result<ZebraConfig> {
        let _ = channel;
        unsupported(FeatureId::Osd, "get_zebra")
    }

    fn set_zebra(&self, channel: &mut ControlChannel, config: &ZebraConfig) -> Result<()> {
        let _ = (channel, config);
        unsupported(FeatureId::Osd, "set_zebra")
    }
}

impl ControlProtocol {
    fn osd(&self, operation: &'static str) -> Result<&dyn OsdOps> {
        match self.driver(FeatureId::Osd, operation)? {
            FeatureDriver::Osd(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Osd, operation),
        }
    }

    pub fn get_test_pattern(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.osd("get_test_pattern")?.get_test_pattern(channel)
    }

    pub fn set_test_pattern(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.osd("set_test_pattern")?.set_test_pattern(channel, enable)
    }

    pub fn get_center_marker(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.osd("get_center_marker")?.get_center_marker(channel)
    }

    pub fn set_center_marker(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.osd("set_center_marker")?.set_center_marker(channel, mode)
    }

    pub fn get_zebra(&self, channel: &mut ControlChannel) -> Result<ZebraConfig> {
        self.osd("get_zebra")?.get_zebra(channel)
    }

    pub fn set_zebra(&self, channel: &mut ControlChannel, config: &ZebraConfig) -> Result<()> {
        self.osd("set_zebra")?.set_zebra(channel, config)
    }
}

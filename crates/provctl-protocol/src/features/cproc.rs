use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// All color processing values in one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CprocConfig {
    pub brightness: i16,
    pub contrast: u16,
    pub saturation: u16,
    pub hue: i16,
}

impl DeviceRecord for CprocConfig {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "cproc config";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [brightness, contrast, saturation, hue] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            brightness: brightness as i16,
            contrast: contrast as u16,
            saturation: saturation as u16,
            hue: hue as i16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.brightness.into(), self.contrast.into(), self.saturation.into(), self.hue.into()]
    }
}

/// Color processing unit.
pub trait CprocOps: Send {
    fn get_brightness(&self, channel: &mut ControlChannel) -> Result<i16> {
        let _ = channel;
        unsupported(FeatureId::Cproc, "get_brightness")
    }

    fn set_brightness(&self, channel: &mut ControlChannel, brightness: i16) -> Result<()> {
        let _ = (channel, brightness);
        unsupported(FeatureId::Cproc, "set_brightness")
    }

    fn get_contrast(&self, channel: &mut ControlChannel) -> Result<u16> {
        let _ = channel;
        unsupported(FeatureId::Cproc, "get_contrast")
    }

    fn set_contrast(&self, channel: &mut ControlChannel, contrast: u16) -> Result<()> {
        let _ = (channel, contrast);
        unsupported(FeatureId::Cproc, "set_contrast")
    }

    fn get_saturation(&self, channel: &mut ControlChannel) -> Result<u16> {
        let _ = channel;
        unsupported(FeatureId::Cproc, "get_saturation")
    }

    fn set_saturation(&self, channel: &mut ControlChannel, saturation: u16) -> Result<()> {
        let _ = (channel, saturation);
        unsupported(FeatureId::Cproc, "set_saturation")
    }

    fn get_hue(&self, channel: &mut ControlChannel) -> Result<i16> {
        let _ = channel;
        unsupported(FeatureId::Cproc, "get_hue")
    }

    fn set_hue(&self, channel: &mut ControlChannel, hue: i16) -> Result<()> {
        let _ = (channel, hue);
        unsupported(FeatureId::Cproc, "set_hue")
    }

    fn get_cproc(&self, channel: &mut ControlChannel) -> Result<CprocConfig> {
        let _ = channel;
        unsupported(FeatureId::Cproc, "get_cproc")
    }

    fn set_cproc(&self, channel: &mut ControlChannel, config: &CprocConfig) -> Result<()> {
        let _ = (channel, config);
        unsupported(FeatureId::Cproc, "set_cproc")
    }
}

impl ControlProtocol {
    fn cproc(&self, operation: &'static str) -> Result<&dyn CprocOps> {
        match self.driver(FeatureId::Cproc, operation)? {
            FeatureDriver::Cproc(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Cproc, operation),
        }
    }

    pub fn get_brightness(&self, channel: &mut ControlChannel) -> Result<i16> {
        self.cproc("get_brightness")?.get_brightness(channel)
    }

    pub fn set_brightness(&self, channel: &mut ControlChannel, brightness: i16) -> Result<()> {
        self.cproc("set_brightness")?.set_brightness(channel, brightness)
    }

    pub fn get_contrast(&self, channel: &mut ControlChannel) -> Result<u16> {
        self.cproc("get_contrast")?.get_contrast(channel)
    }

    pub fn set_contrast(&self, channel: &mut ControlChannel, contrast: u16) -> Result<()> {
        self.cproc("set_contrast")?.set_contrast(channel, contrast)
    }

    pub fn get_saturation(&self, channel: &mut ControlChannel) -> Result<u16> {
        self.cproc("get_saturation")?.get_saturation(channel)
    }

    pub fn set_saturation(&self, channel: &mut ControlChannel, saturation: u16) -> Result<()> {
        self.cproc("set_saturation")?.set_saturation(channel, saturation)
    }

    pub fn get_hue(&self, channel: &mut ControlChannel) -> Result<i16> {
        self.cproc("get_hue")?.get_hue(channel)
    }

    pub fn set_hue(&self, channel: &mut ControlChannel, hue: i16) -> Result<()> {
        self.cproc("set_hue")?.set_hue(channel, hue)
    }

    pub fn get_cproc(&self, channel: &mut ControlChannel) -> Result<CprocConfig> {
        self.cproc("get_cproc")?.get_cproc(channel)
    }

    pub fn set_cproc(&self, channel: &mut ControlChannel, config: &CprocConfig) -> Result<()> {
        self.cproc("set_cproc")?.set_cproc(channel, config)
    }
}

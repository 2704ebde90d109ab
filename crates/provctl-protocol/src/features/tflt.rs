use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TfltRange {
    pub min: u16,
    pub max: u16,
}

impl DeviceRecord for TfltRange {
    const WIRE_FIELDS: usize = 2;
    const NAME: &'static str = "tflt range";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [min, max] = *wire_fields::<2>(Self::NAME, fields)?;
        Ok(Self {
            min: min as u16,
            max: max as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.min.into(), self.max.into()]
    }
}

/// Temporal noise filter.
pub trait TfltOps: Send {
    fn get_tflt_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Tflt, "get_tflt_enable")
    }

    fn set_tflt_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Tflt, "set_tflt_enable")
    }

    fn get_tflt_denoise(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Tflt, "get_tflt_denoise")
    }

    fn set_tflt_denoise(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        let _ = (channel, level);
        unsupported(FeatureId::Tflt, "set_tflt_denoise")
    }

    fn get_tflt_range(&self, channel: &mut ControlChannel) -> Result<TfltRange> {
        let _ = channel;
        unsupported(FeatureId::Tflt, "get_tflt_range")
    }

    fn set_tflt_range(&self, channel: &mut ControlChannel, range: &TfltRange) -> Result<()> {
        let _ = (channel, range);
        unsupported(FeatureId::Tflt, "set_tflt_range")
    }
}

impl ControlProtocol {
    fn tflt(&self, operation: &'static str) -> Result<&dyn TfltOps> {
        match self.driver(FeatureId::Tflt, operation)? {
            FeatureDriver::Tflt(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Tflt, operation),
        }
    }

    pub fn get_tflt_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.tflt("get_tflt_enable")?.get_tflt_enable(channel)
    }

    pub fn set_tflt_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.tflt("set_tflt_enable")?.set_tflt_enable(channel, enable)
    }

    pub fn get_tflt_denoise(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.tflt("get_tflt_denoise")?.get_tflt_denoise(channel)
    }

    pub fn set_tflt_denoise(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.tflt("set_tflt_denoise")?.set_tflt_denoise(channel, level)
    }

    pub fn get_tflt_range(&self, channel: &mut ControlChannel) -> Result<TfltRange> {
        self.tflt("get_tflt_range")?.get_tflt_range(channel)
    }

    pub fn set_tflt_range(&self, channel: &mut ControlChannel, range: &TfltRange) -> Result<()> {
        self.tflt("set_tflt_range")?.set_tflt_range(channel, range)
    }
}

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Auto exposure control loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AecSetup {
    /// Target mean luminance.
    pub setpoint: u16,
    pub speed: u16,
    pub tolerance: u16,
}

impl DeviceRecord for AecSetup {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "aec setup";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [setpoint, speed, tolerance] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            setpoint: setpoint as u16,
            speed: speed as u16,
            tolerance: tolerance as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.setpoint.into(), self.speed.into(), self.tolerance.into()]
    }
}

/// Automatic exposure and white balance.
pub trait AutoOps: Send {
    fn get_aec_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Auto, "get_aec_enable")
    }

    fn set_aec_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Auto, "set_aec_enable")
    }

    fn get_awb_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Auto, "get_awb_enable")
    }

    fn set_awb_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Auto, "set_awb_enable")
    }

    fn get_aec_setup(&self, channel: &mut ControlChannel) -> Result<AecSetup> {
        let _ = channel;
        unsupported(FeatureId::Auto, "get_aec_setup")
    }

    fn set_aec_setup(&self, channel: &mut ControlChannel, setup: &AecSetup) -> Result<()> {
        let _ = (channel, setup);
        unsupported(FeatureId::Auto, "set_aec_setup")
    }

    fn get_awb_threshold(&self, channel: &mut ControlChannel) -> Result<u16> {
        let _ = channel;
        unsupported(FeatureId::Auto, "get_awb_threshold")
    }

    fn set_awb_threshold(&self, channel: &mut ControlChannel, threshold: u16) -> Result<()> {
        let _ = (channel, threshold);
        unsupported(FeatureId::Auto, "set_awb_threshold")
    }
}

impl ControlProtocol {
    fn auto(&self, operation: &'static str) -> Result<&dyn AutoOps> {
        match self.driver(FeatureId::Auto, operation)? {
            FeatureDriver::Auto(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Auto, operation),
        }
    }

    pub fn get_aec_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.auto("get_aec_enable")?.get_aec_enable(channel)
    }

    pub fn set_aec_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.auto("set_aec_enable")?.set_aec_enable(channel, enable)
    }

    pub fn get_awb_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.auto("get_awb_enable")?.get_awb_enable(channel)
    }

    pub fn set_awb_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.auto("set_awb_enable")?.set_awb_enable(channel, enable)
    }

    pub fn get_aec_setup(&self, channel: &mut ControlChannel) -> Result<AecSetup> {
        self.auto("get_aec_setup")?.get_aec_setup(channel)
    }

    pub fn set_aec_setup(&self, channel: &mut ControlChannel, setup: &AecSetup) -> Result<()> {
        self.auto("set_aec_setup")?.set_aec_setup(channel, setup)
    }

    pub fn get_awb_threshold(&self, channel: &mut ControlChannel) -> Result<u16> {
        self.auto("get_awb_threshold")?.get_awb_threshold(channel)
    }

    pub fn set_awb_threshold(&self, channel: &mut ControlChannel, threshold: u16) -> Result<()> {
        self.auto("set_awb_threshold")?.set_awb_threshold(channel, threshold)
    }
}

//! Motorized lens control.
//!
//! Positions are signed motor steps.

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LensMotorSettings {
    pub speed: u16,
    pub step_mode: u8,
    pub torque: u8,
}

impl DeviceRecord for LensMotorSettings {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "lens motor settings";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [speed, step_mode, torque] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            speed: speed as u16,
            step_mode: step_mode as u8,
            torque: torque as u8,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.speed.into(), self.step_mode.into(), self.torque.into()]
    }
}

/// Lens motor driver.
pub trait LensOps: Send {
    fn get_lens_active(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Lens, "get_lens_active")
    }

    fn set_lens_active(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Lens, "set_lens_active")
    }

    fn get_lens_focus(&self, channel: &mut ControlChannel) -> Result<i32> {
        let _ = channel;
        unsupported(FeatureId::Lens, "get_lens_focus")
    }

    fn set_lens_focus(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        let _ = (channel, position);
        unsupported(FeatureId::Lens, "set_lens_focus")
    }

    fn get_lens_zoom(&self, channel: &mut ControlChannel) -> Result<i32> {
        let _ = channel;
        unsupported(FeatureId::Lens, "get_lens_zoom")
    }

    fn set_lens_zoom(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        let _ = (channel, position);
        unsupported(FeatureId::Lens, "set_lens_zoom")
    }

    fn get_lens_iris(&self, channel: &mut ControlChannel) -> Result<i32> {
        let _ = channel;
        unsupported(FeatureId::Lens, "get_lens_iris")
    }

    fn set_lens_iris(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        let _ = (channel, position);
        unsupported(FeatureId::Lens, "set_lens_iris")
    }

    fn get_lens_focus_settings(&self, channel: &mut ControlChannel) -> Result<LensMotorSettings> {
        let _ = channel;
        unsupported(FeatureId::Lens, "get_lens_focus_settings")
    }

    fn set_lens_focus_settings(
        &self,
        channel: &mut ControlChannel,
        settings: &LensMotorSettings,
    ) -> Result<()> {
        let _ = (channel, settings);
        unsupported(FeatureId::Lens, "set_lens_focus_settings")
    }
}

impl ControlProtocol {
    fn lens(&self, operation: &'static str) -> Result<&dyn LensOps> {
        match self.driver(FeatureId::Lens, operation)? {
            FeatureDriver::Lens(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Lens, operation),
        }
    }

    pub fn get_lens_active(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.lens("get_lens_active")?.get_lens_active(channel)
    }

    pub fn set_lens_active(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.lens("set_lens_active")?.set_lens_active(channel, enable)
    }

    pub fn get_lens_focus(&self, channel: &mut ControlChannel) -> Result<i32> {
        self.lens("get_lens_focus")?.get_lens_focus(channel)
    }

    pub fn set_lens_focus(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.lens("set_lens_focus")?.set_lens_focus(channel, position)
    }

    pub fn get_lens_zoom(&self, channel: &mut ControlChannel) -> Result<i32> {
        self.lens("get_lens_zoom")?.get_lens_zoom(channel)
    }

    pub fn set_lens_zoom(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.lens("set_lens_zoom")?.set_lens_zoom(channel, position)
    }

    pub fn get_lens_iris(&self, channel: &mut ControlChannel) -> Result<i32> {
        self.lens("get_lens_iris")?.get_lens_iris(channel)
    }

    pub fn set_lens_iris(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.lens("set_lens_iris")?.set_lens_iris(channel, position)
    }

    pub fn get_lens_focus_settings(
        &self,
        channel: &mut ControlChannel,
    ) -> Result<LensMotorSettings> {
        self.lens("get_lens_focus_settings")?.get_lens_focus_settings(channel)
    }

    pub fn set_lens_focus_settings(
        &self,
        channel: &mut ControlChannel,
        settings: &LensMotorSettings,
    ) -> Result<()> {
        self.lens("set_lens_focus_settings")?.set_lens_focus_settings(channel, settings)
    }
}

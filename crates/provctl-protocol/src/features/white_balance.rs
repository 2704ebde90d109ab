use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Per-channel white balance gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WbGains {
    pub red: u16,
    /// Green pixels on red rows.
    pub green_r: u16,
    /// Green pixels on blue rows.
    pub green_b: u16,
    pub blue: u16,
}

impl DeviceRecord for WbGains {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "white balance gains";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [red, green_r, green_b, blue] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            red: red as u16,
            green_r: green_r as u16,
            green_b: green_b as u16,
            blue: blue as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.red.into(), self.green_r.into(), self.green_b.into(), self.blue.into()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlackLevel {
    pub red: i16,
    pub green: i16,
    pub blue: i16,
}

impl DeviceRecord for BlackLevel {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "black level";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [red, green, blue] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            red: red as i16,
            green: green as i16,
            blue: blue as i16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.red.into(), self.green.into(), self.blue.into()]
    }
}

/// White balance and black level.
pub trait WhiteBalanceOps: Send {
    fn get_wb_gains(&self, channel: &mut ControlChannel) -> Result<WbGains> {
        let _ = channel;
        unsupported(FeatureId::WhiteBalance, "get_wb_gains")
    }

    fn set_wb_gains(&self, channel: &mut ControlChannel, gains: &WbGains) -> Result<()> {
        let _ = (channel, gains);
        unsupported(FeatureId::WhiteBalance, "set_wb_gains")
    }

    fn get_black_level(&self, channel: &mut ControlChannel) -> Result<BlackLevel> {
        let _ = channel;
        unsupported(FeatureId::WhiteBalance, "get_black_level")
    }

    fn set_black_level(&self, channel: &mut ControlChannel, level: &BlackLevel) -> Result<()> {
        let _ = (channel, level);
        unsupported(FeatureId::WhiteBalance, "set_black_level")
    }

    /// Index of the active color temperature preset.
    fn get_wb_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::WhiteBalance, "get_wb_preset")
    }

    fn set_wb_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        let _ = (channel, preset);
        unsupported(FeatureId::WhiteBalance, "set_wb_preset")
    }
}

impl ControlProtocol {
    fn white_balance(&self, operation: &'static str) -> Result<&dyn WhiteBalanceOps> {
        match self.driver(FeatureId::WhiteBalance, operation)? {
            FeatureDriver::WhiteBalance(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::WhiteBalance, operation),
        }
    }

    pub fn get_wb_gains(&self, channel: &mut ControlChannel) -> Result<WbGains> {
        self.white_balance("get_wb_gains")?.get_wb_gains(channel)
    }

    pub fn set_wb_gains(&self, channel: &mut ControlChannel, gains: &WbGains) -> Result<()> {
        self.white_balance("set_wb_gains")?.set_wb_gains(channel, gains)
    }

    pub fn get_black_level(&self, channel: &mut ControlChannel) -> Result<BlackLevel> {
        self.white_balance("get_black_level")?.get_black_level(channel)
    }

    pub fn set_black_level(&self, channel: &mut ControlChannel, level: &BlackLevel) -> Result<()> {
        self.white_balance("set_black_level")?.set_black_level(channel, level)
    }

    pub fn get_wb_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.white_balance("get_wb_preset")?.get_wb_preset(channel)
    }

    pub fn set_wb_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        self.white_balance("set_wb_preset")?.set_wb_preset(channel, preset)
    }
}

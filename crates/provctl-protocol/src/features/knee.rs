//! Knee compression of highlights above a configurable knee point.

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KneeConfig {
    pub enable: u8,
    /// Knee point in percent of full scale.
    pub knee_point: u8,
    pub knee_slope: u16,
    pub white_clip: u16,
}

impl DeviceRecord for KneeConfig {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "knee config";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [enable, knee_point, knee_slope, white_clip] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            enable: enable as u8,
            knee_point: knee_point as u8,
            knee_slope: knee_slope as u16,
            white_clip: white_clip as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![
            self.enable.into(),
            self.knee_point.into(),
            self.knee_slope.into(),
            self.white_clip.into(),
        ]
    }
}

/// Knee function.
pub trait KneeOps: Send {
    fn get_knee_config(&self, channel: &mut ControlChannel) -> Result<KneeConfig> {
        let _ = channel;
        unsupported(FeatureId::Knee, "get_knee_config")
    }

    fn set_knee_config(&self, channel: &mut ControlChannel, config: &KneeConfig) -> Result<()> {
        let _ = (channel, config);
        unsupported(FeatureId::Knee, "set_knee_config")
    }
}

impl ControlProtocol {
    fn knee(&self, operation: &'static str) -> Result<&dyn KneeOps> {
        match self.driver(FeatureId::Knee, operation)? {
            FeatureDriver::Knee(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Knee, operation),
        }
    }

    pub fn get_knee_config(&self, channel: &mut ControlChannel) -> Result<KneeConfig> {
        self.knee("get_knee_config")?.get_knee_config(channel)
    }

    pub fn set_knee_config(&self, channel: &mut ControlChannel, config: &KneeConfig) -> Result<()> {
        self.knee("set_knee_config")?.set_knee_config(channel, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_matches_command_layout() {
        let config = KneeConfig {
            enable: 1,
            knee_point: 5,
            knee_slope: 320,
            white_clip: 105,
        };
        assert_eq!(config.to_fields(), vec![1, 5, 320, 105]);
        assert_eq!(KneeConfig::from_fields(&[1, 5, 320, 105]).unwrap(), config);
    }

    #[test]
    fn short_field_slice_is_rejected() {
        assert!(KneeConfig::from_fields(&[1, 5, 320]).is_err());
    }
}

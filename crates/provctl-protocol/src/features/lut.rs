use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Samples per [`LutSamples`] transfer.
pub const LUT_SAMPLE_VALUES: usize = 8;

/// A run of consecutive gamma table samples starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LutSamples {
    pub offset: u16,
    pub values: [u16; LUT_SAMPLE_VALUES],
}

impl DeviceRecord for LutSamples {
    const WIRE_FIELDS: usize = 1 + LUT_SAMPLE_VALUES;
    const NAME: &'static str = "lut samples";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let fields = wire_fields::<9>(Self::NAME, fields)?;
        Ok(Self {
            offset: fields[0] as u16,
            values: std::array::from_fn(|i| fields[1 + i] as u16),
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        std::iter::once(self.offset)
            .chain(self.values)
            .map(i64::from)
            .collect()
    }
}

/// Gamma look-up table.
pub trait LutOps: Send {
    fn get_lut_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Lut, "get_lut_enable")
    }

    fn set_lut_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Lut, "set_lut_enable")
    }

    fn get_lut_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Lut, "get_lut_preset")
    }

    fn set_lut_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        let _ = (channel, preset);
        unsupported(FeatureId::Lut, "set_lut_preset")
    }

    /// Gamma exponent times 100.
    fn get_lut_gamma(&self, channel: &mut ControlChannel) -> Result<u16> {
        let _ = channel;
        unsupported(FeatureId::Lut, "get_lut_gamma")
    }

    fn set_lut_gamma(&self, channel: &mut ControlChannel, gamma: u16) -> Result<()> {
        let _ = (channel, gamma);
        unsupported(FeatureId::Lut, "set_lut_gamma")
    }

    fn set_lut_samples(&self, channel: &mut ControlChannel, samples: &LutSamples) -> Result<()> {
        let _ = (channel, samples);
        unsupported(FeatureId::Lut, "set_lut_samples")
    }
}

impl ControlProtocol {
    fn lut(&self, operation: &'static str) -> Result<&dyn LutOps> {
        match self.driver(FeatureId::Lut, operation)? {
            FeatureDriver::Lut(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Lut, operation),
        }
    }

    pub fn get_lut_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.lut("get_lut_enable")?.get_lut_enable(channel)
    }

    pub fn set_lut_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.lut("set_lut_enable")?.set_lut_enable(channel, enable)
    }

    pub fn get_lut_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.lut("get_lut_preset")?.get_lut_preset(channel)
    }

    pub fn set_lut_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        self.lut("set_lut_preset")?.set_lut_preset(channel, preset)
    }

    pub fn get_lut_gamma(&self, channel: &mut ControlChannel) -> Result<u16> {
        self.lut("get_lut_gamma")?.get_lut_gamma(channel)
    }

    pub fn set_lut_gamma(&self, channel: &mut ControlChannel, gamma: u16) -> Result<()> {
        self.lut("set_lut_gamma")?.set_lut_gamma(channel, gamma)
    }

    pub fn set_lut_samples(
        &self,
        channel: &mut ControlChannel,
        samples: &LutSamples,
    ) -> Result<()> {
        self.lut("set_lut_samples")?.set_lut_samples(channel, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_leads_the_samples() {
        let samples = LutSamples {
            offset: 256,
            values: [0, 10, 20, 30, 40, 50, 60, 70],
        };
        assert_eq!(
            samples.to_fields(),
            vec![256, 0, 10, 20, 30, 40, 50, 60, 70]
        );
        assert_eq!(LutSamples::from_fields(&samples.to_fields()).unwrap(), samples);
    }
}

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Correction gains for the four Bayer phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FpncGains {
    pub gain0: u16,
    pub gain1: u16,
    pub gain2: u16,
    pub gain3: u16,
}

impl DeviceRecord for FpncGains {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "fpnc gains";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [gain0, gain1, gain2, gain3] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            gain0: gain0 as u16,
            gain1: gain1 as u16,
            gain2: gain2 as u16,
            gain3: gain3 as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![
            self.gain0.into(),
            self.gain1.into(),
            self.gain2.into(),
            self.gain3.into(),
        ]
    }
}

/// Coefficients per [`FpncData`] transfer.
pub const FPNC_DATA_VALUES: usize = 8;

/// Precomputed correction coefficients written verbatim to one column slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FpncData {
    pub page: u8,
    pub column: u16,
    pub values: [u32; FPNC_DATA_VALUES],
}

impl DeviceRecord for FpncData {
    const WIRE_FIELDS: usize = 2 + FPNC_DATA_VALUES;
    const NAME: &'static str = "fpnc data";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let fields = wire_fields::<10>(Self::NAME, fields)?;
        Ok(Self {
            page: fields[0] as u8,
            column: fields[1] as u16,
            values: std::array::from_fn(|i| fields[2 + i] as u32),
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        let mut fields = Vec::with_capacity(Self::WIRE_FIELDS);
        fields.push(self.page.into());
        fields.push(self.column.into());
        fields.extend(self.values.iter().map(|&v| i64::from(v)));
        fields
    }
}

/// Fixed-pattern-noise correction.
pub trait FpncOps: Send {
    fn get_fpnc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Fpnc, "get_fpnc_enable")
    }

    fn set_fpnc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Fpnc, "set_fpnc_enable")
    }

    fn get_fpnc_gains(&self, channel: &mut ControlChannel) -> Result<FpncGains> {
        let _ = channel;
        unsupported(FeatureId::Fpnc, "get_fpnc_gains")
    }

    fn set_fpnc_gains(&self, channel: &mut ControlChannel, gains: &FpncGains) -> Result<()> {
        let _ = (channel, gains);
        unsupported(FeatureId::Fpnc, "set_fpnc_gains")
    }

    fn set_fpnc_data(&self, channel: &mut ControlChannel, data: &FpncData) -> Result<()> {
        let _ = (channel, data);
        unsupported(FeatureId::Fpnc, "set_fpnc_data")
    }
}

impl ControlProtocol {
    fn fpnc(&self, operation: &'static str) -> Result<&dyn FpncOps> {
        match self.driver(FeatureId::Fpnc, operation)? {
            FeatureDriver::Fpnc(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Fpnc, operation),
        }
    }

    pub fn get_fpnc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.fpnc("get_fpnc_enable")?.get_fpnc_enable(channel)
    }

    pub fn set_fpnc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.fpnc("set_fpnc_enable")?.set_fpnc_enable(channel, enable)
    }

    pub fn get_fpnc_gains(&self, channel: &mut ControlChannel) -> Result<FpncGains> {
        self.fpnc("get_fpnc_gains")?.get_fpnc_gains(channel)
    }

    pub fn set_fpnc_gains(&self, channel: &mut ControlChannel, gains: &FpncGains) -> Result<()> {
        self.fpnc("set_fpnc_gains")?.set_fpnc_gains(channel, gains)
    }

    pub fn set_fpnc_data(&self, channel: &mut ControlChannel, data: &FpncData) -> Result<()> {
        self.fpnc("set_fpnc_data")?.set_fpnc_data(channel, data)
    }
}

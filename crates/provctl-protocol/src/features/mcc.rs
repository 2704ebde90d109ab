use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// One hue segment of the multi-color controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MccPhase {
    pub id: u8,
    pub saturation: u32,
    pub hue: i32,
}

impl DeviceRecord for MccPhase {
    const WIRE_FIELDS: usize = 3;
    const NAME: &'static str = "mcc phase";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [id, saturation, hue] = *wire_fields::<3>(Self::NAME, fields)?;
        Ok(Self {
            id: id as u8,
            saturation: saturation as u32,
            hue: hue as i32,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.id.into(), self.saturation.into(), self.hue.into()]
    }
}

/// Multi-color controller.
pub trait MccOps: Send {
    fn get_mcc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Mcc, "get_mcc_enable")
    }

    fn set_mcc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Mcc, "set_mcc_enable")
    }

    /// Operation mode, which also selects the number of phases.
    fn get_mcc_opmode(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Mcc, "get_mcc_opmode")
    }

    fn set_mcc_opmode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Mcc, "set_mcc_opmode")
    }

    fn get_mcc_phase(&self, channel: &mut ControlChannel, id: u8) -> Result<MccPhase> {
        let _ = (channel, id);
        unsupported(FeatureId::Mcc, "get_mcc_phase")
    }

    fn set_mcc_phase(&self, channel: &mut ControlChannel, phase: &MccPhase) -> Result<()> {
        let _ = (channel, phase);
        unsupported(FeatureId::Mcc, "set_mcc_phase")
    }

    /// Bit mask of phases highlighted on the output.
    fn get_mcc_blink(&self, channel: &mut ControlChannel) -> Result<u32> {
        let _ = channel;
        unsupported(FeatureId::Mcc, "get_mcc_blink")
    }

    fn set_mcc_blink(&self, channel: &mut ControlChannel, mask: u32) -> Result<()> {
        let _ = (channel, mask);
        unsupported(FeatureId::Mcc, "set_mcc_blink")
    }
}

impl ControlProtocol {
    fn mcc(&self, operation: &'static str) -> Result<&dyn MccOps> {
        match self.driver(FeatureId::Mcc, operation)? {
            FeatureDriver::Mcc(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Mcc, operation),
        }
    }

    pub fn get_mcc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.mcc("get_mcc_enable")?.get_mcc_enable(channel)
    }

    pub fn set_mcc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.mcc("set_mcc_enable")?.set_mcc_enable(channel, enable)
    }

    pub fn get_mcc_opmode(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.mcc("get_mcc_opmode")?.get_mcc_opmode(channel)
    }

    pub fn set_mcc_opmode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.mcc("set_mcc_opmode")?.set_mcc_opmode(channel, mode)
    }

    pub fn get_mcc_phase(&self, channel: &mut ControlChannel, id: u8) -> Result<MccPhase> {
        self.mcc("get_mcc_phase")?.get_mcc_phase(channel, id)
    }

    pub fn set_mcc_phase(&self, channel: &mut ControlChannel, phase: &MccPhase) -> Result<()> {
        self.mcc("set_mcc_phase")?.set_mcc_phase(channel, phase)
    }

    pub fn get_mcc_blink(&self, channel: &mut ControlChannel) -> Result<u32> {
        self.mcc("get_mcc_blink")?.get_mcc_blink(channel)
    }

    pub fn set_mcc_blink(&self, channel: &mut ControlChannel, mask: u32) -> Result<()> {
        self.mcc("set_mcc_blink")?.set_mcc_blink(channel, mask)
    }
}

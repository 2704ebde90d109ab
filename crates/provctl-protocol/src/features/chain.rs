use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl DeviceRecord for Timecode {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "timecode";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [hours, minutes, seconds, frames] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            frames: frames as u8,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.hours.into(), self.minutes.into(), self.seconds.into(), self.frames.into()]
    }
}

impl std::fmt::Display for Timecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

/// Video output chain.
pub trait ChainOps: Send {
    fn get_video_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Chain, "get_video_mode")
    }

    fn set_video_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Chain, "set_video_mode")
    }

    /// Legal (0) or extended (1) SDI output range.
    fn get_sdi_range(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Chain, "get_sdi_range")
    }

    fn set_sdi_range(&self, channel: &mut ControlChannel, range: u8) -> Result<()> {
        let _ = (channel, range);
        unsupported(FeatureId::Chain, "set_sdi_range")
    }

    fn get_genlock_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Chain, "get_genlock_mode")
    }

    fn set_genlock_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Chain, "set_genlock_mode")
    }

    fn get_flip_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Chain, "get_flip_mode")
    }

    fn set_flip_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Chain, "set_flip_mode")
    }

    fn get_timecode(&self, channel: &mut ControlChannel) -> Result<Timecode> {
        let _ = channel;
        unsupported(FeatureId::Chain, "get_timecode")
    }

    fn set_timecode(&self, channel: &mut ControlChannel, timecode: &Timecode) -> Result<()> {
        let _ = (channel, timecode);
        unsupported(FeatureId::Chain, "set_timecode")
    }
}

impl ControlProtocol {
    fn chain(&self, operation: &'static str) -> Result<&dyn ChainOps> {
        match self.driver(FeatureId::Chain, operation)? {
            FeatureDriver::Chain(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Chain, operation),
        }
    }

    pub fn get_video_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.chain("get_video_mode")?.get_video_mode(channel)
    }

    pub fn set_video_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.chain("set_video_mode")?.set_video_mode(channel, mode)
    }

    pub fn get_sdi_range(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.chain("get_sdi_range")?.get_sdi_range(channel)
    }

    pub fn set_sdi_range(&self, channel: &mut ControlChannel, range: u8) -> Result<()> {
        self.chain("set_sdi_range")?.set_sdi_range(channel, range)
    }

    pub fn get_genlock_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.chain("get_genlock_mode")?.get_genlock_mode(channel)
    }

    pub fn set_genlock_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.chain("set_genlock_mode")?.set_genlock_mode(channel, mode)
    }

    pub fn get_flip_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.chain("get_flip_mode")?.get_flip_mode(channel)
    }

    pub fn set_flip_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.chain("set_flip_mode")?.set_flip_mode(channel, mode)
    }

    pub fn get_timecode(&self, channel: &mut ControlChannel) -> Result<Timecode> {
        self.chain("get_timecode")?.get_timecode(channel)
    }

    pub fn set_timecode(&self, channel: &mut ControlChannel, timecode: &Timecode) -> Result<()> {
        self.chain("set_timecode")?.set_timecode(channel, timecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timecode_display() {
        let tc = Timecode::from_fields(&[1, 2, 3, 24]).unwrap();
        assert_eq!(tc.to_string(), "01:02:03:24");
    }
}

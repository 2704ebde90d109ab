use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Sensor limits reported by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CamInfo {
    pub min_gain: u32,
    pub max_gain: u32,
    pub min_exposure: u32,
    pub max_exposure: u32,
}

impl DeviceRecord for CamInfo {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "cam info";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [min_gain, max_gain, min_exposure, max_exposure] =
            *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            min_gain: min_gain as u32,
            max_gain: max_gain as u32,
            min_exposure: min_exposure as u32,
            max_exposure: max_exposure as u32,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![
            self.min_gain.into(),
            self.max_gain.into(),
            self.min_exposure.into(),
            self.max_exposure.into(),
        ]
    }
}

/// Sensor readout window offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoiOffset {
    pub x: u16,
    pub y: u16,
}

impl DeviceRecord for RoiOffset {
    const WIRE_FIELDS: usize = 2;
    const NAME: &'static str = "roi offset";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [x, y] = *wire_fields::<2>(Self::NAME, fields)?;
        Ok(Self {
            x: x as u16,
            y: y as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.x.into(), self.y.into()]
    }
}

/// Camera sensor control.
pub trait CamOps: Send {
    fn get_cam_info(&self, channel: &mut ControlChannel) -> Result<CamInfo> {
        let _ = channel;
        unsupported(FeatureId::Cam, "get_cam_info")
    }

    fn get_cam_gain(&self, channel: &mut ControlChannel) -> Result<u32> {
        let _ = channel;
        unsupported(FeatureId::Cam, "get_cam_gain")
    }

    fn set_cam_gain(&self, channel: &mut ControlChannel, gain: u32) -> Result<()> {
        let _ = (channel, gain);
        unsupported(FeatureId::Cam, "set_cam_gain")
    }

    /// Exposure time in microseconds.
    fn get_cam_exposure(&self, channel: &mut ControlChannel) -> Result<u32> {
        let _ = channel;
        unsupported(FeatureId::Cam, "get_cam_exposure")
    }

    fn set_cam_exposure(&self, channel: &mut ControlChannel, exposure: u32) -> Result<()> {
        let _ = (channel, exposure);
        unsupported(FeatureId::Cam, "set_cam_exposure")
    }

    fn get_cam_roi_offset(&self, channel: &mut ControlChannel) -> Result<RoiOffset> {
        let _ = channel;
        unsupported(FeatureId::Cam, "get_cam_roi_offset")
    }

    fn set_cam_roi_offset(&self, channel: &mut ControlChannel, offset: &RoiOffset) -> Result<()> {
        let _ = (channel, offset);
        unsupported(FeatureId::Cam, "set_cam_roi_offset")
    }
}

impl ControlProtocol {
    fn cam(&self, operation: &'static str) -> Result<&dyn CamOps> {
        match self.driver(FeatureId::Cam, operation)? {
            FeatureDriver::Cam(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Cam, operation),
        }
    }

    pub fn get_cam_info(&self, channel: &mut ControlChannel) -> Result<CamInfo> {
        self.cam("get_cam_info")?.get_cam_info(channel)
    }

    pub fn get_cam_gain(&self, channel: &mut ControlChannel) -> Result<u32> {
        self.cam("get_cam_gain")?.get_cam_gain(channel)
    }

    pub fn set_cam_gain(&self, channel: &mut ControlChannel, gain: u32) -> Result<()> {
        self.cam("set_cam_gain")?.set_cam_gain(channel, gain)
    }

    pub fn get_cam_exposure(&self, channel: &mut ControlChannel) -> Result<u32> {
        self.cam("get_cam_exposure")?.get_cam_exposure(channel)
    }

    pub fn set_cam_exposure(&self, channel: &mut ControlChannel, exposure: u32) -> Result<()> {
        self.cam("set_cam_exposure")?
            .set_cam_exposure(channel, exposure)
    }

    pub fn get_cam_roi_offset(&self, channel: &mut ControlChannel) -> Result<RoiOffset> {
        self.cam("get_cam_roi_offset")?.get_cam_roi_offset(channel)
    }

    pub fn set_cam_roi_offset(
        &self,
        channel: &mut ControlChannel,
        offset: &RoiOffset,
    ) -> Result<()> {
        self.cam("set_cam_roi_offset")?
            .set_cam_roi_offset(channel, offset)
    }
}

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Geometry limits of the statistics window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoiInfo {
    pub max_width: u16,
    pub max_height: u16,
    pub step_width: u16,
    pub step_height: u16,
}

impl DeviceRecord for RoiInfo {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "roi info";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [max_width, max_height, step_width, step_height] =
            *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            max_width: max_width as u16,
            max_height: max_height as u16,
            step_width: step_width as u16,
            step_height: step_height as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![
            self.max_width.into(),
            self.max_height.into(),
            self.step_width.into(),
            self.step_height.into(),
        ]
    }
}

/// Statistics window in sensor pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoiWindow {
    pub offset_x: u16,
    pub offset_y: u16,
    pub width: u16,
    pub height: u16,
}

impl DeviceRecord for RoiWindow {
    const WIRE_FIELDS: usize = 4;
    const NAME: &'static str = "roi window";

    fn from_fields(fields: &[i64]) -> Result<Self> {
        let [offset_x, offset_y, width, height] = *wire_fields::<4>(Self::NAME, fields)?;
        Ok(Self {
            offset_x: offset_x as u16,
            offset_y: offset_y as u16,
            width: width as u16,
            height: height as u16,
        })
    }

    fn to_fields(&self) -> Vec<i64> {
        vec![self.offset_x.into(), self.offset_y.into(), self.width.into(), self.height.into()]
    }
}

/// Statistics region of interest.
pub trait RoiOps: Send {
    fn get_roi_info(&self, channel: &mut ControlChannel) -> Result<RoiInfo> {
        let _ = channel;
        unsupported(FeatureId::Roi, "get_roi_info")
    }

    fn get_roi(&self, channel: &mut ControlChannel) -> Result<RoiWindow> {
        let _ = channel;
        unsupported(FeatureId::Roi, "get_roi")
    }

    fn set_roi(&self, channel: &mut ControlChannel, window: &RoiWindow) -> Result<()> {
        let _ = (channel, window);
        unsupported(FeatureId::Roi, "set_roi")
    }
}

impl ControlProtocol {
    fn roi(&self, operation: &'static str) -> Result<&dyn RoiOps> {
        match self.driver(FeatureId::Roi, operation)? {
            FeatureDriver::Roi(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Roi, operation),
        }
    }

    pub fn get_roi_info(&self, channel: &mut ControlChannel) -> Result<RoiInfo> {
        self.roi("get_roi_info")?.get_roi_info(channel)
    }

    pub fn get_roi(&self, channel: &mut ControlChannel) -> Result<RoiWindow> {
        self.roi("get_roi")?.get_roi(channel)
    }

    pub fn set_roi(&self, channel: &mut ControlChannel, window: &RoiWindow) -> Result<()> {
        self.roi("set_roi")?.set_roi(channel, window)
    }
}

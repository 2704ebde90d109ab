//! Camera sensor, auto exposure, statistics window and FPN correction.

use provctl_channel::ControlChannel;
use provctl_protocol::{
    AecSetup, AutoOps, CamInfo, CamOps, FpncData, FpncGains, FpncOps, Result, RoiInfo, RoiOffset,
    RoiOps, RoiWindow,
};

use crate::driver::ProVideo;

impl CamOps for ProVideo {
    fn get_cam_info(&self, channel: &mut ControlChannel) -> Result<CamInfo> {
        self.get_record(channel, "cam_info")
    }

    fn get_cam_gain(&self, channel: &mut ControlChannel) -> Result<u32> {
        Ok(self.get_value(channel, "cam_gain")? as u32)
    }

    fn set_cam_gain(&self, channel: &mut ControlChannel, gain: u32) -> Result<()> {
        self.set(channel, "cam_gain", &[gain.into()])
    }

    fn get_cam_exposure(&self, channel: &mut ControlChannel) -> Result<u32> {
        Ok(self.get_value(channel, "cam_exposure")? as u32)
    }

    fn set_cam_exposure(&self, channel: &mut ControlChannel, exposure: u32) -> Result<()> {
        self.set(channel, "cam_exposure", &[exposure.into()])
    }

    fn get_cam_roi_offset(&self, channel: &mut ControlChannel) -> Result<RoiOffset> {
        self.get_record(channel, "cam_roi_offset")
    }

    fn set_cam_roi_offset(&self, channel: &mut ControlChannel, offset: &RoiOffset) -> Result<()> {
        self.set_record(channel, "cam_roi_offset", offset)
    }
}

impl AutoOps for ProVideo {
    fn get_aec_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "aec")? as u8)
    }

    fn set_aec_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "aec", &[enable.into()])
    }

    fn get_awb_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "awb")? as u8)
    }

    fn set_awb_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "awb", &[enable.into()])
    }

    fn get_aec_setup(&self, channel: &mut ControlChannel) -> Result<AecSetup> {
        self.get_record(channel, "aec_setup")
    }

    fn set_aec_setup(&self, channel: &mut ControlChannel, setup: &AecSetup) -> Result<()> {
        self.set_record(channel, "aec_setup", setup)
    }

    fn get_awb_threshold(&self, channel: &mut ControlChannel) -> Result<u16> {
        Ok(self.get_value(channel, "awb_threshold")? as u16)
    }

    fn set_awb_threshold(&self, channel: &mut ControlChannel, threshold: u16) -> Result<()> {
        self.set(channel, "awb_threshold", &[threshold.into()])
    }
}

impl RoiOps for ProVideo {
    fn get_roi_info(&self, channel: &mut ControlChannel) -> Result<RoiInfo> {
        self.get_record(channel, "stat_roi_info")
    }

    fn get_roi(&self, channel: &mut ControlChannel) -> Result<RoiWindow> {
        self.get_record(channel, "stat_roi")
    }

    fn set_roi(&self, channel: &mut ControlChannel, window: &RoiWindow) -> Result<()> {
        self.set_record(channel, "stat_roi", window)
    }
}

impl FpncOps for ProVideo {
    fn get_fpnc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "fpnc")? as u8)
    }

    fn set_fpnc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "fpnc", &[enable.into()])
    }

    fn get_fpnc_gains(&self, channel: &mut ControlChannel) -> Result<FpncGains> {
        self.get_record(channel, "fpnc_gains")
    }

    fn set_fpnc_gains(&self, channel: &mut ControlChannel, gains: &FpncGains) -> Result<()> {
        self.set_record(channel, "fpnc_gains", gains)
    }

    fn set_fpnc_data(&self, channel: &mut ControlChannel, data: &FpncData) -> Result<()> {
        self.set_record(channel, "fpnc_data", data)
    }
}

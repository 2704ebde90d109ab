use provctl_channel::ControlChannel;
use provctl_protocol::{IrisOps, LensMotorSettings, LensOps, Result};

use crate::driver::ProVideo;

impl LensOps for ProVideo {
    fn get_lens_active(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "lens_active")? as u8)
    }

    fn set_lens_active(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "lens_active", &[enable.into()])
    }

    fn get_lens_focus(&self, channel: &mut ControlChannel) -> Result<i32> {
        Ok(self.get_value(channel, "lens_focus_pos")? as i32)
    }

    fn set_lens_focus(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.set(channel, "lens_focus_pos", &[position.into()])
    }

    fn get_lens_zoom(&self, channel: &mut ControlChannel) -> Result<i32> {
        Ok(self.get_value(channel, "lens_zoom_pos")? as i32)
    }

    fn set_lens_zoom(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.set(channel, "lens_zoom_pos", &[position.into()])
    }

    fn get_lens_iris(&self, channel: &mut ControlChannel) -> Result<i32> {
        Ok(self.get_value(channel, "lens_iris_pos")? as i32)
    }

    fn set_lens_iris(&self, channel: &mut ControlChannel, position: i32) -> Result<()> {
        self.set(channel, "lens_iris_pos", &[position.into()])
    }

    fn get_lens_focus_settings(&self, channel: &mut ControlChannel) -> Result<LensMotorSettings> {
        self.get_record(channel, "lens_focus_settings")
    }

    fn set_lens_focus_settings(
        &self,
        channel: &mut ControlChannel,
        settings: &LensMotorSettings,
    ) -> Result<()> {
        self.set_record(channel, "lens_focus_settings", settings)
    }
}

impl IrisOps for ProVideo {
    fn get_iris_aperture(&self, channel: &mut ControlChannel) -> Result<u16> {
        Ok(self.get_value(channel, "iris_apt")? as u16)
    }

    fn set_iris_aperture(&self, channel: &mut ControlChannel, aperture: u16) -> Result<()> {
        self.set(channel, "iris_apt", &[aperture.into()])
    }

    fn get_iris_type(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "iris_type")? as u8)
    }

    fn set_iris_type(&self, channel: &mut ControlChannel, kind: u8) -> Result<()> {
        self.set(channel, "iris_type", &[kind.into()])
    }
}

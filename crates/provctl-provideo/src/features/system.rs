use provctl_channel::ControlChannel;
use provctl_protocol::{Result, SystemOps, Temperature, VersionInfo};

use crate::driver::ProVideo;

impl SystemOps for ProVideo {
    fn get_version(&self, channel: &mut ControlChannel) -> Result<VersionInfo> {
        self.get_record(channel, "version")
    }

    fn get_temperature(&self, channel: &mut ControlChannel) -> Result<Temperature> {
        self.get_record(channel, "temp")
    }

    fn get_fan_speed(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "fan")? as u8)
    }

    fn set_fan_speed(&self, channel: &mut ControlChannel, speed: u8) -> Result<()> {
        self.set(channel, "fan", &[speed.into()])
    }

    fn get_runtime(&self, channel: &mut ControlChannel) -> Result<u32> {
        Ok(self.get_value(channel, "runtime")? as u32)
    }

    fn get_prompt(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "prompt")? as u8)
    }

    fn set_prompt(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "prompt", &[enable.into()])
    }

    fn get_debug_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "debug")? as u8)
    }

    fn set_debug_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.set(channel, "debug", &[level.into()])
    }

    fn save_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.set_with_timeout(channel, "save_settings", &[], self.config().slow_timeout)
    }

    fn load_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.exec(channel, "load_settings")
    }

    fn reset_settings(&self, channel: &mut ControlChannel) -> Result<()> {
        self.exec(channel, "reset_settings")
    }

    fn reboot(&self, channel: &mut ControlChannel) -> Result<()> {
        self.exec(channel, "reboot")
    }
}

use provctl_channel::ControlChannel;
use provctl_protocol::{ChainOps, OsdOps, Result, Timecode, ZebraConfig};

use crate::driver::ProVideo;

impl OsdOps for ProVideo {
    fn get_test_pattern(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "osd_test_pattern")? as u8)
    }

    fn set_test_pattern(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "osd_test_pattern", &[enable.into()])
    }

    fn get_center_marker(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "osd_center_marker")? as u8)
    }

    fn set_center_marker(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.set(channel, "osd_center_marker", &[mode.into()])
    }

    fn get_zebra(&self, channel: &mut ControlChannel) -> Result<ZebraConfig> {
        self.get_record(channel, "osd_zebra")
    }

    fn set_zebra(&self, channel: &mut ControlChannel, config: &ZebraConfig) -> Result<()> {
        self.set_record(channel, "osd_zebra", config)
    }
}

impl ChainOps for ProVideo {
    fn get_video_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "video_mode")? as u8)
    }

    fn set_video_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        // Mode switches re-lock the output; allow the slow deadline.
        self.set_with_timeout(
            channel,
            "video_mode",
            &[mode.into()],
            self.config().slow_timeout,
        )
    }

    fn get_sdi_range(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "sdi_range")? as u8)
    }

    fn set_sdi_range(&self, channel: &mut ControlChannel, range: u8) -> Result<()> {
        self.set(channel, "sdi_range", &[range.into()])
    }

    fn get_genlock_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "genlock")? as u8)
    }

    fn set_genlock_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.set(channel, "genlock", &[mode.into()])
    }

    fn get_flip_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "flip")? as u8)
    }

    fn set_flip_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.set(channel, "flip", &[mode.into()])
    }

    fn get_timecode(&self, channel: &mut ControlChannel) -> Result<Timecode> {
        self.get_record(channel, "timecode")
    }

    fn set_timecode(&self, channel: &mut ControlChannel, timecode: &Timecode) -> Result<()> {
        self.set_record(channel, "timecode", timecode)
    }
}

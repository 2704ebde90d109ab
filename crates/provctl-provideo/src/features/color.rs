//! Color pipeline features.
//!
//! Setters of the chain-aware commands go through `set_chained`, so a
//! registration with `all_chains` reaches every processing chain. The MCC
//! and auto features are per chain only.

use provctl_channel::ControlChannel;
use provctl_protocol::{
    BlackLevel, CprocConfig, CprocOps, DeviceRecord, KneeConfig, KneeOps, LutOps, LutSamples,
    MccOps, MccPhase, ProtocolError, Result, TfltOps, TfltRange, WbGains, WhiteBalanceOps,
};

use crate::driver::ProVideo;

impl CprocOps for ProVideo {
    fn get_brightness(&self, channel: &mut ControlChannel) -> Result<i16> {
        Ok(self.get_value(channel, "cproc_bright")? as i16)
    }

    fn set_brightness(&self, channel: &mut ControlChannel, brightness: i16) -> Result<()> {
        self.set_chained(channel, "cproc_bright", &[brightness.into()])
    }

    fn get_contrast(&self, channel: &mut ControlChannel) -> Result<u16> {
        Ok(self.get_value(channel, "cproc_cont")? as u16)
    }

    fn set_contrast(&self, channel: &mut ControlChannel, contrast: u16) -> Result<()> {
        self.set_chained(channel, "cproc_cont", &[contrast.into()])
    }

    fn get_saturation(&self, channel: &mut ControlChannel) -> Result<u16> {
        Ok(self.get_value(channel, "cproc_sat")? as u16)
    }

    fn set_saturation(&self, channel: &mut ControlChannel, saturation: u16) -> Result<()> {
        self.set_chained(channel, "cproc_sat", &[saturation.into()])
    }

    fn get_hue(&self, channel: &mut ControlChannel) -> Result<i16> {
        Ok(self.get_value(channel, "cproc_hue")? as i16)
    }

    fn set_hue(&self, channel: &mut ControlChannel, hue: i16) -> Result<()> {
        self.set_chained(channel, "cproc_hue", &[hue.into()])
    }

    fn get_cproc(&self, channel: &mut ControlChannel) -> Result<CprocConfig> {
        self.get_record(channel, "cproc")
    }

    fn set_cproc(&self, channel: &mut ControlChannel, config: &CprocConfig) -> Result<()> {
        self.set_record_chained(channel, "cproc", config)
    }
}

impl WhiteBalanceOps for ProVideo {
    fn get_wb_gains(&self, channel: &mut ControlChannel) -> Result<WbGains> {
        self.get_record(channel, "wb_gain")
    }

    fn set_wb_gains(&self, channel: &mut ControlChannel, gains: &WbGains) -> Result<()> {
        self.set_record_chained(channel, "wb_gain", gains)
    }

    fn get_black_level(&self, channel: &mut ControlChannel) -> Result<BlackLevel> {
        self.get_record(channel, "black_level")
    }

    fn set_black_level(&self, channel: &mut ControlChannel, level: &BlackLevel) -> Result<()> {
        self.set_record_chained(channel, "black_level", level)
    }

    fn get_wb_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "wb_preset")? as u8)
    }

    fn set_wb_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        self.set_chained(channel, "wb_preset", &[preset.into()])
    }
}

impl KneeOps for ProVideo {
    fn get_knee_config(&self, channel: &mut ControlChannel) -> Result<KneeConfig> {
        self.get_record(channel, "knee")
    }

    fn set_knee_config(&self, channel: &mut ControlChannel, config: &KneeConfig) -> Result<()> {
        self.set_record_chained(channel, "knee", config)
    }
}

impl MccOps for ProVideo {
    fn get_mcc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "mcc")? as u8)
    }

    fn set_mcc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "mcc", &[enable.into()])
    }

    fn get_mcc_opmode(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "mcc_opmode")? as u8)
    }

    fn set_mcc_opmode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.set(channel, "mcc_opmode", &[mode.into()])
    }

    fn get_mcc_phase(&self, channel: &mut ControlChannel, id: u8) -> Result<MccPhase> {
        let fields =
            self.get_with_args(channel, "mcc_phase", &[id.into()], MccPhase::WIRE_FIELDS)?;
        if fields.first() != Some(&i64::from(id)) {
            return Err(ProtocolError::Fault(format!(
                "mcc_phase: asked for phase {id}, device answered {:?}",
                fields.first()
            )));
        }
        MccPhase::from_fields(&fields)
    }

    fn set_mcc_phase(&self, channel: &mut ControlChannel, phase: &MccPhase) -> Result<()> {
        self.set_record(channel, "mcc_phase", phase)
    }

    fn get_mcc_blink(&self, channel: &mut ControlChannel) -> Result<u32> {
        Ok(self.get_value(channel, "mcc_blink")? as u32)
    }

    fn set_mcc_blink(&self, channel: &mut ControlChannel, mask: u32) -> Result<()> {
        self.set(channel, "mcc_blink", &[mask.into()])
    }
}

impl TfltOps for ProVideo {
    fn get_tflt_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "tflt")? as u8)
    }

    fn set_tflt_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set_chained(channel, "tflt", &[enable.into()])
    }

    fn get_tflt_denoise(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "tflt_denoise")? as u8)
    }

    fn set_tflt_denoise(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.set_chained(channel, "tflt_denoise", &[level.into()])
    }

    fn get_tflt_range(&self, channel: &mut ControlChannel) -> Result<TfltRange> {
        self.get_record(channel, "tflt_min_max")
    }

    fn set_tflt_range(&self, channel: &mut ControlChannel, range: &TfltRange) -> Result<()> {
        self.set_record_chained(channel, "tflt_min_max", range)
    }
}

impl LutOps for ProVideo {
    fn get_lut_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "lut_enable")? as u8)
    }

    fn set_lut_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set_chained(channel, "lut_enable", &[enable.into()])
    }

    fn get_lut_preset(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "lut_preset")? as u8)
    }

    fn set_lut_preset(&self, channel: &mut ControlChannel, preset: u8) -> Result<()> {
        self.set_chained(channel, "lut_preset", &[preset.into()])
    }

    fn get_lut_gamma(&self, channel: &mut ControlChannel) -> Result<u16> {
        Ok(self.get_value(channel, "lut_gamma")? as u16)
    }

    fn set_lut_gamma(&self, channel: &mut ControlChannel, gamma: u16) -> Result<()> {
        self.set_chained(channel, "lut_gamma", &[gamma.into()])
    }

    fn set_lut_samples(&self, channel: &mut ControlChannel, samples: &LutSamples) -> Result<()> {
        self.set_record_chained(channel, "lut_sample", samples)
    }
}

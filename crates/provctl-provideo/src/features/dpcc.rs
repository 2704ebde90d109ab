use provctl_channel::ControlChannel;
use provctl_protocol::{DpcPixel, DpcTable, DpccOps, ProtocolError, Result};
use tracing::{debug, warn};

use crate::driver::ProVideo;
use crate::scan::{is_anchor, scan_fields};

/// Per-entry line of a `dpc_table` listing: `dpc_pixel <index> <x> <y>`.
const PIXEL_LINE: &str = "dpc_pixel";

impl DpccOps for ProVideo {
    fn get_dpc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "dpc")? as u8)
    }

    fn set_dpc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.set(channel, "dpc", &[enable.into()])
    }

    fn get_dpc_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "dpc_mode")? as u8)
    }

    fn set_dpc_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.set(channel, "dpc_mode", &[mode.into()])
    }

    fn get_dpc_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        Ok(self.get_value(channel, "dpc_level")? as u8)
    }

    fn set_dpc_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.set(channel, "dpc_level", &[level.into()])
    }

    fn add_dpc_pixel(&self, channel: &mut ControlChannel, pixel: &DpcPixel) -> Result<()> {
        self.set_record(channel, "dpc_add", pixel)
    }

    fn get_dpc_table(&self, channel: &mut ControlChannel, table: &mut DpcTable) -> Result<()> {
        table.clear();
        let mut reported = 0usize;
        let mut malformed: Option<ProtocolError> = None;

        self.transact_lines(
            channel,
            "dpc_table",
            &[],
            self.config().slow_timeout,
            &mut |line: &str| {
                if malformed.is_some() || !is_anchor(line, PIXEL_LINE) {
                    return;
                }
                match scan_fields(line, PIXEL_LINE, 3) {
                    Ok(fields) => {
                        reported += 1;
                        if !table.is_full() {
                            let pixel = DpcPixel {
                                x: fields[1] as u16,
                                y: fields[2] as u16,
                            };
                            // Cannot fail: fullness checked above.
                            let _ = table.push(pixel);
                        }
                    }
                    Err(err) => malformed = Some(err),
                }
            },
        )?;

        if let Some(err) = malformed {
            return Err(err);
        }
        if reported > table.len() {
            warn!(
                reported,
                capacity = table.capacity(),
                "defect pixel table truncated to capacity"
            );
        }
        debug!(entries = table.len(), "read defect pixel table");
        Ok(())
    }

    fn set_dpc_table(&self, channel: &mut ControlChannel, table: &DpcTable) -> Result<()> {
        self.clear_dpc_table(channel)?;
        for pixel in table {
            self.add_dpc_pixel(channel, pixel)?;
        }
        debug!(entries = table.len(), "wrote defect pixel table");
        Ok(())
    }

    fn clear_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.exec(channel, "dpc_clear")
    }

    fn save_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.set_with_timeout(channel, "dpc_save", &[], self.config().slow_timeout)
    }

    fn load_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.exec(channel, "dpc_load")
    }
}

//! Defect pixel correction.
//!
//! Besides the scalar controls the device keeps a table of defective pixel
//! coordinates. [`DpcTable`] is the host-side copy: its capacity is fixed by
//! the caller and never exceeded, whatever the device reports.

use provctl_channel::ControlChannel;
use serde::{Deserialize, Serialize};

use crate::error::{unsupported, ProtocolError, Result};
use crate::feature::FeatureId;
use crate::record::{wire_fields, DeviceRecord};
use crate::registry::{ControlProtocol, FeatureDriver};

/// Sensor coordinate of one defective pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DpcPixel {
    pub x: u16,
    pub y: u16,
}

impl DeviceRecord for DpcPixel {
    const WIRE_FIELDS: usize = 2;
    const NAME: &'static str = "defect pixel";

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

/// Bounded list of defective pixels in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpcTable {
    capacity: usize,
    pixels: Vec<DpcPixel>,
}

impl DpcTable {
    /// Table size of the current firmware generation.
    pub const DEFAULT_CAPACITY: usize = 2048;

    /// Empty table holding at most `capacity` pixels.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            pixels: Vec::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
        }
    }

    /// Build a table from pixels; fails if they exceed `capacity`.
    pub fn from_pixels(capacity: usize, pixels: &[DpcPixel]) -> Result<Self> {
        let mut table = Self::with_capacity(capacity);
        for pixel in pixels {
            table.push(*pixel)?;
        }
        Ok(table)
    }

    /// Append a pixel. A full table rejects it with invalid argument.
    pub fn push(&mut self, pixel: DpcPixel) -> Result<()> {
        if self.is_full() {
            return Err(ProtocolError::InvalidArgument(format!(
                "defect pixel table full ({} entries)",
                self.capacity
            )));
        }
        self.pixels.push(pixel);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pixels.len() >= self.capacity
    }

    pub fn pixels(&self) -> &[DpcPixel] {
        &self.pixels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DpcPixel> {
        self.pixels.iter()
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
    }
}

impl Default for DpcTable {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a DpcTable {
    type Item = &'a DpcPixel;
    type IntoIter = std::slice::Iter<'a, DpcPixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Defect pixel correction.
pub trait DpccOps: Send {
    fn get_dpc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "get_dpc_enable")
    }

    fn set_dpc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        let _ = (channel, enable);
        unsupported(FeatureId::Dpcc, "set_dpc_enable")
    }

    fn get_dpc_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "get_dpc_mode")
    }

    fn set_dpc_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        let _ = (channel, mode);
        unsupported(FeatureId::Dpcc, "set_dpc_mode")
    }

    /// Detection threshold of the automatic correction.
    fn get_dpc_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "get_dpc_level")
    }

    fn set_dpc_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        let _ = (channel, level);
        unsupported(FeatureId::Dpcc, "set_dpc_level")
    }

    /// Append one pixel to the device table.
    fn add_dpc_pixel(&self, channel: &mut ControlChannel, pixel: &DpcPixel) -> Result<()> {
        let _ = (channel, pixel);
        unsupported(FeatureId::Dpcc, "add_dpc_pixel")
    }

    /// Replace the contents of `table` with the device table.
    ///
    /// Entries beyond `table.capacity()` are dropped.
    fn get_dpc_table(&self, channel: &mut ControlChannel, table: &mut DpcTable) -> Result<()> {
        let _ = (channel, table);
        unsupported(FeatureId::Dpcc, "get_dpc_table")
    }

    /// Replace the device table with `table`.
    fn set_dpc_table(&self, channel: &mut ControlChannel, table: &DpcTable) -> Result<()> {
        let _ = (channel, table);
        unsupported(FeatureId::Dpcc, "set_dpc_table")
    }

    fn clear_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "clear_dpc_table")
    }

    /// Persist the device table to flash.
    fn save_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "save_dpc_table")
    }

    fn load_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        let _ = channel;
        unsupported(FeatureId::Dpcc, "load_dpc_table")
    }
}

impl ControlProtocol {
    fn dpcc(&self, operation: &'static str) -> Result<&dyn DpccOps> {
        match self.driver(FeatureId::Dpcc, operation)? {
            FeatureDriver::Dpcc(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Dpcc, operation),
        }
    }

    pub fn get_dpc_enable(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.dpcc("get_dpc_enable")?.get_dpc_enable(channel)
    }

    pub fn set_dpc_enable(&self, channel: &mut ControlChannel, enable: u8) -> Result<()> {
        self.dpcc("set_dpc_enable")?.set_dpc_enable(channel, enable)
    }

    pub fn get_dpc_mode(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.dpcc("get_dpc_mode")?.get_dpc_mode(channel)
    }

    pub fn set_dpc_mode(&self, channel: &mut ControlChannel, mode: u8) -> Result<()> {
        self.dpcc("set_dpc_mode")?.set_dpc_mode(channel, mode)
    }

    pub fn get_dpc_level(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.dpcc("get_dpc_level")?.get_dpc_level(channel)
    }

    pub fn set_dpc_level(&self, channel: &mut ControlChannel, level: u8) -> Result<()> {
        self.dpcc("set_dpc_level")?.set_dpc_level(channel, level)
    }

    pub fn add_dpc_pixel(&self, channel: &mut ControlChannel, pixel: &DpcPixel) -> Result<()> {
        self.dpcc("add_dpc_pixel")?.add_dpc_pixel(channel, pixel)
    }

    pub fn get_dpc_table(
        &self,
        channel: &mut ControlChannel,
        table: &mut DpcTable,
    ) -> Result<()> {
        self.dpcc("get_dpc_table")?.get_dpc_table(channel, table)
    }

    pub fn set_dpc_table(&self, channel: &mut ControlChannel, table: &DpcTable) -> Result<()> {
        self.dpcc("set_dpc_table")?.set_dpc_table(channel, table)
    }

    pub fn clear_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.dpcc("clear_dpc_table")?.clear_dpc_table(channel)
    }

    pub fn save_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.dpcc("save_dpc_table")?.save_dpc_table(channel)
    }

    pub fn load_dpc_table(&self, channel: &mut ControlChannel) -> Result<()> {
        self.dpcc("load_dpc_table")?.load_dpc_table(channel)
    }
}

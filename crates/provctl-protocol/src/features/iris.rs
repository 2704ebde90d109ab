use provctl_channel::ControlChannel;

use crate::error::{unsupported, Result};
use crate::feature::FeatureId;
use crate::registry::{ControlProtocol, FeatureDriver};

/// DC iris.
pub trait IrisOps: Send {
    fn get_iris_aperture(&self, channel: &mut ControlChannel) -> Result<u16> {
        let _ = channel;
        unsupported(FeatureId::Iris, "get_iris_aperture")
    }

    fn set_iris_aperture(&self, channel: &mut ControlChannel, aperture: u16) -> Result<()> {
        let _ = (channel, aperture);
        unsupported(FeatureId::Iris, "set_iris_aperture")
    }

    fn get_iris_type(&self, channel: &mut ControlChannel) -> Result<u8> {
        let _ = channel;
        unsupported(FeatureId::Iris, "get_iris_type")
    }

    fn set_iris_type(&self, channel: &mut ControlChannel, kind: u8) -> Result<()> {
        let _ = (channel, kind);
        unsupported(FeatureId::Iris, "set_iris_type")
    }
}

impl ControlProtocol {
    fn iris(&self, operation: &'static str) -> Result<&dyn IrisOps> {
        match self.driver(FeatureId::Iris, operation)? {
            FeatureDriver::Iris(ops) => Ok(ops.as_ref()),
            _ => unsupported(FeatureId::Iris, operation),
        }
    }

    pub fn get_iris_aperture(&self, channel: &mut ControlChannel) -> Result<u16> {
        self.iris("get_iris_aperture")?.get_iris_aperture(channel)
    }

    pub fn set_iris_aperture(&self, channel: &mut ControlChannel, aperture: u16) -> Result<()> {
        self.iris("set_iris_aperture")?.set_iris_aperture(channel, aperture)
    }

    pub fn get_iris_type(&self, channel: &mut ControlChannel) -> Result<u8> {
        self.iris("get_iris_type")?.get_iris_type(channel)
    }

    pub fn set_iris_type(&self, channel: &mut ControlChannel, kind: u8) -> Result<()> {
        self.iris("set_iris_type")?.set_iris_type(channel, kind)
    }
}

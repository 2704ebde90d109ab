use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::feature::FeatureId;
use crate::features::{
    AutoOps, CamOps, ChainOps, CprocOps, DpccOps, FpncOps, IrisOps, KneeOps, LensOps, LutOps,
    MccOps, OsdOps, RoiOps, SystemOps, TfltOps, WhiteBalanceOps,
};

/// A driver for one feature, tagged by the feature it serves.
pub enum FeatureDriver {
    System(Box<dyn SystemOps>),
    Cam(Box<dyn CamOps>),
    Cproc(Box<dyn CprocOps>),
    WhiteBalance(Box<dyn WhiteBalanceOps>),
    Auto(Box<dyn AutoOps>),
    Knee(Box<dyn KneeOps>),
    Osd(Box<dyn OsdOps>),
    Dpcc(Box<dyn DpccOps>),
    Mcc(Box<dyn MccOps>),
    Tflt(Box<dyn TfltOps>),
    Lens(Box<dyn LensOps>),
    Iris(Box<dyn IrisOps>),
    Roi(Box<dyn RoiOps>),
    Fpnc(Box<dyn FpncOps>),
    Chain(Box<dyn ChainOps>),
    Lut(Box<dyn LutOps>),
}

impl FeatureDriver {
    /// The feature this driver serves.
    pub fn feature(&self) -> FeatureId {
        match self {
            Self::System(_) => FeatureId::System,
            Self::Cam(_) => FeatureId::Cam,
            Self::Cproc(_) => FeatureId::Cproc,
            Self::WhiteBalance(_) => FeatureId::WhiteBalance,
            Self::Auto(_) => FeatureId::Auto,
            Self::Knee(_) => FeatureId::Knee,
            Self::Osd(_) => FeatureId::Osd,
            Self::Dpcc(_) => FeatureId::Dpcc,
            Self::Mcc(_) => FeatureId::Mcc,
            Self::Tflt(_) => FeatureId::Tflt,
            Self::Lens(_) => FeatureId::Lens,
            Self::Iris(_) => FeatureId::Iris,
            Self::Roi(_) => FeatureId::Roi,
            Self::Fpnc(_) => FeatureId::Fpnc,
            Self::Chain(_) => FeatureId::Chain,
            Self::Lut(_) => FeatureId::Lut,
        }
    }
}

impl fmt::Debug for FeatureDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FeatureDriver").field(&self.feature()).finish()
    }
}

/// Feature-keyed dispatch from typed calls to registered drivers.
///
/// The registry performs no I/O. Each forwarding method looks up the driver
/// for its feature and hands it the caller's channel; a feature without a
/// driver reports [`ProtocolError::NotSupported`]. Driver results are
/// returned unchanged.
///
/// Registration is independent of channel state: a registry can be filled
/// before any channel is open.
#[derive(Debug, Default)]
pub struct ControlProtocol {
    drivers: BTreeMap<FeatureId, FeatureDriver>,
}

impl ControlProtocol {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver for the feature it serves.
    pub fn register(&mut self, driver: FeatureDriver) -> Result<()> {
        let feature = driver.feature();
        if self.drivers.contains_key(&feature) {
            return Err(ProtocolError::AlreadyRegistered(feature));
        }
        debug!(%feature, "feature driver registered");
        self.drivers.insert(feature, driver);
        Ok(())
    }

    /// Remove the driver for `feature`. Returns whether one was registered.
    pub fn unregister(&mut self, feature: FeatureId) -> bool {
        let removed = self.drivers.remove(&feature).is_some();
        if removed {
            debug!(%feature, "feature driver unregistered");
        }
        removed
    }

    /// Check if a feature has a registered driver.
    pub fn is_registered(&self, feature: FeatureId) -> bool {
        self.drivers.contains_key(&feature)
    }

    /// Registered features, in [`FeatureId`] order.
    pub fn features(&self) -> Vec<FeatureId> {
        self.drivers.keys().copied().collect()
    }

    /// Remove every driver.
    pub fn clear(&mut self) {
        self.drivers.clear();
    }

    pub(crate) fn driver(
        &self,
        feature: FeatureId,
        operation: &'static str,
    ) -> Result<&FeatureDriver> {
        self.drivers
            .get(&feature)
            .ok_or(ProtocolError::NotSupported { feature, operation })
    }
}

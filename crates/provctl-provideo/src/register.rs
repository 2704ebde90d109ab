use provctl_protocol::{ControlProtocol, FeatureDriver, FeatureId, Result};
use tracing::info;

use crate::config::{DriverConfig, DriverOptions};
use crate::driver::ProVideo;

impl ProVideo {
    /// Box this driver as the implementation of `feature`.
    pub fn feature_driver(&self, feature: FeatureId) -> FeatureDriver {
        let driver = Box::new(*self);
        match feature {
            FeatureId::System => FeatureDriver::System(driver),
            FeatureId::Cam => FeatureDriver::Cam(driver),
            FeatureId::Cproc => FeatureDriver::Cproc(driver),
            FeatureId::WhiteBalance => FeatureDriver::WhiteBalance(driver),
            FeatureId::Auto => FeatureDriver::Auto(driver),
            FeatureId::Knee => FeatureDriver::Knee(driver),
            FeatureId::Osd => FeatureDriver::Osd(driver),
            FeatureId::Dpcc => FeatureDriver::Dpcc(driver),
            FeatureId::Mcc => FeatureDriver::Mcc(driver),
            FeatureId::Tflt => FeatureDriver::Tflt(driver),
            FeatureId::Lens => FeatureDriver::Lens(driver),
            FeatureId::Iris => FeatureDriver::Iris(driver),
            FeatureId::Roi => FeatureDriver::Roi(driver),
            FeatureId::Fpnc => FeatureDriver::Fpnc(driver),
            FeatureId::Chain => FeatureDriver::Chain(driver),
            FeatureId::Lut => FeatureDriver::Lut(driver),
        }
    }

    /// Register this driver for each of `features`.
    pub fn register(&self, protocol: &mut ControlProtocol, features: &[FeatureId]) -> Result<()> {
        for &feature in features {
            protocol.register(self.feature_driver(feature))?;
        }
        Ok(())
    }
}

/// Register the ProVideo driver for every feature with one set of options.
pub fn register_all(
    protocol: &mut ControlProtocol,
    config: DriverConfig,
    options: DriverOptions,
) -> Result<()> {
    ProVideo::with_config(config)
        .with_options(options)
        .register(protocol, &FeatureId::ALL)?;
    info!(
        features = FeatureId::ALL.len(),
        all_chains = options.all_chains,
        "registered provideo driver"
    );
    Ok(())
}

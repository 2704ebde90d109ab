//! Per-feature operation traits, their device records, and the matching
//! forwarding methods on [`ControlProtocol`](crate::ControlProtocol).

mod auto;
mod cam;
mod chain;
mod cproc;
mod dpcc;
mod fpnc;
mod iris;
mod knee;
mod lens;
mod lut;
mod mcc;
mod osd;
mod roi;
mod system;
mod tflt;
mod white_balance;

pub use auto::{AecSetup, AutoOps};
pub use cam::{CamInfo, CamOps, RoiOffset};
pub use chain::{ChainOps, Timecode};
pub use cproc::{CprocConfig, CprocOps};
pub use dpcc::{DpcPixel, DpcTable, DpccOps};
pub use fpnc::{FpncData, FpncGains, FpncOps, FPNC_DATA_VALUES};
pub use iris::IrisOps;
pub use knee::{KneeConfig, KneeOps};
pub use lens::{LensMotorSettings, LensOps};
pub use lut::{LutOps, LutSamples, LUT_SAMPLE_VALUES};
pub use mcc::{MccOps, MccPhase};
pub use osd::{OsdOps, ZebraConfig};
pub use roi::{RoiInfo, RoiOps, RoiWindow};
pub use system::{SystemOps, Temperature, VersionInfo};
pub use tflt::{TfltOps, TfltRange};
pub use white_balance::{BlackLevel, WbGains, WhiteBalanceOps};

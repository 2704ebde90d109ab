//! Feature trait implementations for [`ProVideo`](crate::ProVideo).

mod color;
mod dpcc;
mod optics;
mod output;
mod sensor;
mod system;

//! Marshaling between typed device records and wire integer fields.
//!
//! Every multi-field record travels as a fixed number of integers in a fixed
//! order. Decoding casts each integer into the record's field type with `as`
//! semantics (two's complement truncation); the device enforces its own
//! ranges and answers with a failure token instead of out-of-range data.

use crate::error::{ProtocolError, Result};

/// A fixed-layout record exchanged with the device as integer fields.
pub trait DeviceRecord: Sized + Copy {
    /// Number of integers on the wire.
    const WIRE_FIELDS: usize;

    /// Short record name for diagnostics.
    const NAME: &'static str;

    /// Decode from exactly [`WIRE_FIELDS`](Self::WIRE_FIELDS) integers.
    ///
    /// A slice of any other length is rejected with
    /// [`ProtocolError::InvalidArgument`] before a field is read.
    fn from_fields(fields: &[i64]) -> Result<Self>;

    /// Encode into wire order.
    fn to_fields(&self) -> Vec<i64>;
}

/// View `fields` as an array of `N`, or fail with invalid argument.
pub(crate) fn wire_fields<'a, const N: usize>(
    record: &str,
    fields: &'a [i64],
) -> Result<&'a [i64; N]> {
    <&[i64; N]>::try_from(fields).map_err(|_| {
        ProtocolError::InvalidArgument(format!(
            "{record} expects {N} fields, got {}",
            fields.len()
        ))
    })
}

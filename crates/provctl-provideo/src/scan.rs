use provctl_protocol::{ProtocolError, Result};

/// True if `line` echoes command `name`: the name at line start followed by
/// whitespace or the end of the line.
pub(crate) fn is_anchor(line: &str, name: &str) -> bool {
    match line.trim_start().strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Parse exactly `expected` integers following the anchor `name`.
///
/// Any non-integer token, or a count other than `expected`, is a fault.
pub(crate) fn scan_fields(line: &str, name: &str, expected: usize) -> Result<Vec<i64>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(name) {
        return Err(ProtocolError::Fault(format!(
            "response line {line:?} does not start with {name}"
        )));
    }

    let fields = tokens
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                ProtocolError::Fault(format!("{name}: non-integer field {token:?}"))
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    if fields.len() != expected {
        return Err(ProtocolError::Fault(format!(
            "{name}: expected {expected} fields, got {}",
            fields.len()
        )));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use provctl_protocol::ErrorKind;

    use super::*;

    #[test]
    fn anchor_requires_word_boundary() {
        assert!(is_anchor("cam_gain 120", "cam_gain"));
        assert!(is_anchor("  cam_gain", "cam_gain"));
        assert!(!is_anchor("cam_gain_max 4", "cam_gain"));
        assert!(!is_anchor("x cam_gain 4", "cam_gain"));
        assert!(is_anchor("dpc\t1", "dpc"));
    }

    #[test]
    fn scans_signed_fields() {
        assert_eq!(
            scan_fields("mcc_phase 3 100 -20", "mcc_phase", 3).unwrap(),
            vec![3, 100, -20]
        );
    }

    #[test]
    fn count_mismatch_is_fault() {
        for line in ["knee 1 5 320", "knee 1 5 320 105 7", "knee"] {
            let err = scan_fields(line, "knee", 4).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Fault, "{line}");
        }
    }

    #[test]
    fn garbage_field_is_fault() {
        let err = scan_fields("cam_gain 12x", "cam_gain", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
        let err = scan_fields("cam_gain 99999999999999999999", "cam_gain", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
    }
}

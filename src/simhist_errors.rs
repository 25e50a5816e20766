use thiserror::Error;

use crate::time_history::quantity::Quantity;

#[derive(Error, Debug)]
pub enum SimhistError {
    #[error("Bad container magic: {0}")]
    BadMagic(String),

    #[error("Invalid binary structure: {0}")]
    InvalidFormat(String),

    #[error("Stream ended before the field was complete: {0}")]
    TruncatedRead(String),

    #[error("Node index {node} out of range (declared node count: {node_count})")]
    NodeOutOfRange { node: usize, node_count: usize },

    #[error("Step index {step} out of range (series length: {len})")]
    StepOutOfRange { step: usize, len: usize },

    #[error("Quantity not recorded in this segment: {0}")]
    QuantityNotRecorded(Quantity),

    #[error("Continuity violation: {0}")]
    ContinuityViolation(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SimhistError {
    /// `true` for errors local to one decode call (bad magic, unexpected structure,
    /// truncated stream). Callers may skip the offending file and keep going.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SimhistError::BadMagic(_)
                | SimhistError::InvalidFormat(_)
                | SimhistError::TruncatedRead(_)
        )
    }

    /// `true` for contract violations on node or step indices.
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            SimhistError::NodeOutOfRange { .. } | SimhistError::StepOutOfRange { .. }
        )
    }

    /// Convert a nom failure raised while decoding `context` into a crate error.
    ///
    /// Complete-input parsers report a short buffer as `ErrorKind::Eof`; that case is a
    /// truncated read, anything else is a structural error.
    pub(crate) fn from_nom<I>(err: nom::Err<nom::error::Error<I>>, context: &str) -> Self {
        match err {
            nom::Err::Incomplete(_) => SimhistError::TruncatedRead(context.to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::Eof => SimhistError::TruncatedRead(context.to_string()),
                kind => SimhistError::InvalidFormat(format!("{context} ({kind:?})")),
            },
        }
    }
}

impl PartialEq for SimhistError {
    fn eq(&self, other: &Self) -> bool {
        use SimhistError::*;
        match (self, other) {
            (BadMagic(a), BadMagic(b)) => a == b,
            (InvalidFormat(a), InvalidFormat(b)) => a == b,
            (TruncatedRead(a), TruncatedRead(b)) => a == b,
            (
                NodeOutOfRange {
                    node: a,
                    node_count: na,
                },
                NodeOutOfRange {
                    node: b,
                    node_count: nb,
                },
            ) => a == b && na == nb,
            (StepOutOfRange { step: a, len: la }, StepOutOfRange { step: b, len: lb }) => {
                a == b && la == lb
            }
            (QuantityNotRecorded(a), QuantityNotRecorded(b)) => a == b,
            (ContinuityViolation(a), ContinuityViolation(b)) => a == b,

            // Not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (UnknownCommand(a), UnknownCommand(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            _ => false,
        }
    }
}

#[cfg(test)]
mod test_simhist_errors {
    use super::*;
    use nom::number::complete::le_u32;

    #[test]
    fn test_nom_eof_maps_to_truncated_read() {
        let err = le_u32::<_, nom::error::Error<&[u8]>>(&[1u8, 2][..]).unwrap_err();
        let mapped = SimhistError::from_nom(err, "variable count");
        assert_eq!(
            mapped,
            SimhistError::TruncatedRead("variable count".to_string())
        );
        assert!(mapped.is_format_error());
        assert!(!mapped.is_index_error());
    }

    #[test]
    fn test_error_classification() {
        let idx = SimhistError::NodeOutOfRange {
            node: 4,
            node_count: 2,
        };
        assert!(idx.is_index_error());
        assert!(!idx.is_format_error());
        assert_eq!(
            idx.to_string(),
            "Node index 4 out of range (declared node count: 2)"
        );
    }
}

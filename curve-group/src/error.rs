use thiserror::Error;

/// Coarse classification of [`Error`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed encoding length or unrecognized marker byte.
    Format,
    /// Decoded data does not describe a valid element.
    Validation,
    /// A payload or recovered length exceeds its bound.
    Length,
    /// The algebraic operation is undefined for the input.
    Domain,
    /// Rejection sampling ran out of attempts.
    RandomnessExhausted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("unrecognized point format marker {0:#04x}")]
    UnknownFormat(u8),
    #[error("decoded point is not on the curve")]
    NotOnCurve,
    #[error("decoded scalar is not reduced modulo the group order")]
    ScalarOutOfRange,
    #[error("invalid domain parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("payload of {len} bytes exceeds the embedding capacity of {max} bytes")]
    PayloadTooLong { len: usize, max: usize },
    #[error("embedded length {len} exceeds the embedding capacity of {max} bytes")]
    InvalidEmbeddedLength { len: usize, max: usize },
    #[error("attempted to invert a zero scalar")]
    TriedToInvertZero,
    #[error("no acceptable random value found after {0} attempts")]
    RandomnessExhausted(usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength { .. } | Self::UnknownFormat(_) => ErrorKind::Format,
            Self::NotOnCurve | Self::ScalarOutOfRange | Self::InvalidParameters(_) => {
                ErrorKind::Validation
            }
            Self::PayloadTooLong { .. } | Self::InvalidEmbeddedLength { .. } => ErrorKind::Length,
            Self::TriedToInvertZero => ErrorKind::Domain,
            Self::RandomnessExhausted(_) => ErrorKind::RandomnessExhausted,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let err = Error::InvalidLength {
            expected: 65,
            actual: 3,
        };
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(
            err.to_string(),
            "invalid encoding length: expected 65 bytes, got 3"
        );
        assert_eq!(
            Error::UnknownFormat(5).to_string(),
            "unrecognized point format marker 0x05"
        );
        assert_eq!(Error::NotOnCurve.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::PayloadTooLong { len: 31, max: 30 }.kind(),
            ErrorKind::Length
        );
        assert_eq!(Error::TriedToInvertZero.kind(), ErrorKind::Domain);
        assert_eq!(
            Error::RandomnessExhausted(10).kind(),
            ErrorKind::RandomnessExhausted
        );
    }
}

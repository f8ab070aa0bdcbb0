use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QrError {
    /// The encoded input exceeds the largest supported version/level
    /// combination. Carries the maximum payload size in bytes that would
    /// have fit under the requested configuration.
    CapacityExceeded(usize),
    InvalidMaskPattern,
    DivisionByZero,
}

impl Display for QrError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::CapacityExceeded(max) => {
                write!(f, "Data too long: at most {max} bytes fit the supported versions")
            }
            Self::InvalidMaskPattern => f.write_str("Invalid masking pattern"),
            Self::DivisionByZero => f.write_str("Division by zero in GF(256)"),
        }
    }
}

impl std::error::Error for QrError {}

pub type QrResult<T> = Result<T, QrError>;

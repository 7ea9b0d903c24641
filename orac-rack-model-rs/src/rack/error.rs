use core::fmt;

/// Errors raised while building rack entities from remote declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RackError {
    /// The parameter type tag is not one of the known tags
    /// (`pct`, `freq`, `time`, `pitch`, `bool`, `int`, `pan`).
    UnknownParamKind,
    /// A parameter range has `min > max`.
    InvertedRange,
    /// A parameter bound, default or value is NaN or infinite.
    NonFinite,
}

impl fmt::Display for RackError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RackError::UnknownParamKind => write!(f, "unknown parameter type tag"),
            RackError::InvertedRange => write!(f, "parameter minimum exceeds maximum"),
            RackError::NonFinite => write!(f, "parameter value is not a finite number"),
        }
    }
}

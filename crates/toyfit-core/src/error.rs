//! Error types for toyfit

use thiserror::Error;

/// toyfit error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed numeric table input
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the input file
        line: usize,
        /// What went wrong on that line
        message: String,
    },

    /// Invalid caller-supplied configuration, rejected before any computation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Design matrix is singular: the x values do not vary enough to
    /// determine a linear fit
    #[error("Degenerate design: all x values are (numerically) identical")]
    DegenerateDesign,

    /// Dataset size does not exceed the number of fitted parameters
    #[error("Insufficient degrees of freedom: {n_obs} observations for {n_params} parameters")]
    InsufficientDegreesOfFreedom {
        /// Number of observations supplied
        n_obs: usize,
        /// Number of free parameters in the model
        n_params: usize,
    },

    /// Computation error (non-finite intermediate or result)
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::InsufficientDegreesOfFreedom { n_obs: 2, n_params: 2 };
        assert!(e.to_string().contains("2 observations"));

        let e = Error::Parse { line: 7, message: "bad float".into() };
        assert!(e.to_string().contains("line 7"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}

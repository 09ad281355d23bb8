/// Errors returned when decoding from untrusted byte slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The buffer does not have the length the encoding requires.
    #[error("Invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// The bytes are not the canonical encoding of any value.
    #[error("Non-canonical encoding")]
    NonCanonical,
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Check that `got` bytes were supplied where `expected` are required.
pub(crate) fn check_length(expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(Error::InvalidLength { expected, got })
    }
}

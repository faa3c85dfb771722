use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Buffer size mismatch for {what}: expected {expected} elements, got {got}")]
    BufferSizeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Allocation of {elements} scratch elements failed")]
    AllocationFailure { elements: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check that `buffer` holds exactly `expected` elements.
pub(crate) fn check_len(what: &'static str, buffer: &[f32], expected: usize) -> Result<()> {
    if buffer.len() != expected {
        tracing::warn!(what, expected, got = buffer.len(), "rejecting buffer of wrong length");
        return Err(Error::BufferSizeMismatch {
            what,
            expected,
            got: buffer.len(),
        });
    }
    Ok(())
}

/// Allocate a zero-filled scratch buffer, surfacing allocation failure as an error.
pub(crate) fn zeroed(elements: usize) -> Result<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| Error::AllocationFailure { elements })?;
    buf.resize(elements, 0.0);
    Ok(buf)
}

//! Error types for drawing and flushing

use platform::{DecodeError, FontError, TransportError};

/// Errors returned by [`Display`](crate::Display) operations.
///
/// Out-of-range coordinates are never an error: writes outside the buffer
/// are clipped or truncated silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
pub enum GfxError {
    /// Pixel buffer or scratch buffer could not be reserved
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure {
        /// Requested size in bytes
        bytes: usize,
    },

    /// Rejected before any buffer mutation
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Corrupt or inconsistent font/image asset data
    #[error("asset error: {0}")]
    Asset(&'static str),

    /// JPEG decoder failure
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Outline font engine failure
    #[error("font error: {0}")]
    Font(#[from] FontError),

    /// Panel bus failure; the flush in progress is abandoned
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GfxError>;

/// Reserve a zero-filled byte vector without panicking on exhaustion.
pub(crate) fn try_zeroed(bytes: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| GfxError::AllocationFailure { bytes })?;
    data.resize(bytes, 0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_errors_convert() {
        let err: GfxError = TransportError::Communication.into();
        assert_eq!(err, GfxError::Transport(TransportError::Communication));
        let err: GfxError = DecodeError::Format.into();
        assert_eq!(err, GfxError::Decode(DecodeError::Format));
    }

    #[test]
    fn test_display_messages() {
        let err = GfxError::AllocationFailure { bytes: 1024 };
        assert_eq!(err.to_string(), "allocation of 1024 bytes failed");
        let err = GfxError::InvalidArgument("empty polygon");
        assert_eq!(err.to_string(), "invalid argument: empty polygon");
    }

    #[test]
    fn test_try_zeroed() {
        let data = try_zeroed(16).unwrap_or_default();
        assert_eq!(data.len(), 16);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_try_zeroed_reports_exhaustion() {
        assert_eq!(
            try_zeroed(usize::MAX),
            Err(GfxError::AllocationFailure { bytes: usize::MAX })
        );
    }
}

use std::fmt;

/// Errors produced while synthesizing an icon container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source raster is empty or its buffer does not match its size.
    #[error("invalid raster: {0}")]
    InvalidRaster(String),

    /// A target size or size/encoding pair outside the fixed ladders.
    #[error("unsupported resolution: {0}")]
    UnsupportedResolution(String),

    /// A pixel or container encoder rejected its input.
    #[error("encoding failed: {0}")]
    EncodingFailure(String),

    /// A size or offset does not fit the container's fields.
    #[error("container overflow: {0}")]
    PackingOverflow(String),

    /// The conversion options are out of range or select nothing.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRaster(_) => ErrorKind::InvalidRaster,
            Error::UnsupportedResolution(_) => ErrorKind::UnsupportedResolution,
            Error::EncodingFailure(_) => ErrorKind::EncodingFailure,
            Error::PackingOverflow(_) => ErrorKind::PackingOverflow,
            Error::InvalidOptions(_) => ErrorKind::InvalidOptions,
        }
    }
}

impl From<png::EncodingError> for Error {
    fn from(error: png::EncodingError) -> Self {
        Error::EncodingFailure(format!("PNG encoder: {}", error))
    }
}

/// Classification of an [`Error`], as reported in a failed conversion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// See [`Error::InvalidRaster`].
    InvalidRaster,
    /// See [`Error::UnsupportedResolution`].
    UnsupportedResolution,
    /// See [`Error::EncodingFailure`].
    EncodingFailure,
    /// See [`Error::PackingOverflow`].
    PackingOverflow,
    /// See [`Error::InvalidOptions`].
    InvalidOptions,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidRaster => "InvalidRaster",
            ErrorKind::UnsupportedResolution => "UnsupportedResolution",
            ErrorKind::EncodingFailure => "EncodingFailure",
            ErrorKind::PackingOverflow => "PackingOverflow",
            ErrorKind::InvalidOptions => "InvalidOptions",
        };
        out.write_str(name)
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let error = Error::PackingOverflow("offset".to_string());
        assert_eq!(error.kind(), ErrorKind::PackingOverflow);
        assert_eq!(error.to_string(), "container overflow: offset");
        assert_eq!(ErrorKind::InvalidRaster.to_string(), "InvalidRaster");
    }
}

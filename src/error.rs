use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported PNG pixel layout: {0}")]
    UnsupportedLayout(String),

    #[error("encoding error: {0}")]
    Encode(#[from] chr_tile::EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_display() {
        let error = ConvertError::Encode(chr_tile::EncodeError::TileSize { size: 12 });
        assert_eq!(
            error.to_string(),
            "encoding error: tile size 12 is not in the supported range 1..=8"
        );
    }

    #[test]
    fn test_unsupported_layout_display() {
        let error = ConvertError::UnsupportedLayout("16-bit grayscale".to_string());
        assert_eq!(
            error.to_string(),
            "unsupported PNG pixel layout: 16-bit grayscale"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: ConvertError = io.into();
        assert!(matches!(error, ConvertError::Io(_)));
    }
}

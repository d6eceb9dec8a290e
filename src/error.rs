use thiserror::Error;

/// Failure to obtain the target text from its source
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("text source answered with status {0}")]
    Status(u16),

    #[error("malformed text payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("could not read text file: {0}")]
    Io(#[from] std::io::Error),

    #[error("text source returned no text")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", FetchError::Empty),
            "text source returned no text"
        );
        assert_eq!(
            format!("{}", FetchError::Status(404)),
            "text source answered with status 404"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FetchError = io.into();
        assert!(err.to_string().contains("gone"));
    }
}

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    InvalidArgument,
    MalformedSnapshot,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn malformed_snapshot(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::MalformedSnapshot, context.into())
    }

    pub fn is_malformed_snapshot(&self) -> bool {
        self.kind == ErrorKind::MalformedSnapshot
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::MalformedSnapshot,
            context: format!("snapshot is not a token map: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_map_to_malformed_snapshot() {
        let err: Error = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(err.is_malformed_snapshot());
        assert!(err.to_string().starts_with("MalformedSnapshot: "));
    }

    #[test]
    fn test_io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such snapshot");
        let err: Error = io.into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.context, "no such snapshot");
    }
}

use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    YearOutOfRange,
    YearNotAllowed,
    ConfigParse,
    ConfigInvalid,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn year_out_of_range(year: i32) -> Self {
        Error::new(
            ErrorKind::YearOutOfRange,
            &format!("{} cannot be represented as a calendar date", year),
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &error.to_string())
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let Error { kind, message } = err;

        match kind {
            ErrorKind::IOError(err) => err,
            kind => io::Error::new(
                io::ErrorKind::InvalidInput,
                message.unwrap_or_else(|| kind.as_str()),
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::YearOutOfRange => "year out of range".to_owned(),
            ErrorKind::YearNotAllowed => "invalid year".to_owned(),
            ErrorKind::ConfigParse => "invalid config format".to_owned(),
            ErrorKind::ConfigInvalid => "invalid config value".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::new(ErrorKind::YearNotAllowed, "'12' has to have four digits");
        assert_eq!(err.to_string(), "invalid year: '12' has to have four digits");
    }

    #[test]
    fn io_roundtrip_keeps_kind() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn into_io_without_message() {
        let io_err: io::Error = Error::from(ErrorKind::YearNotAllowed).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(io_err.to_string(), "invalid year");

        let io_err: io::Error = Error::new(ErrorKind::ConfigInvalid, "bad colour").into();
        assert_eq!(io_err.to_string(), "bad colour");
    }
}

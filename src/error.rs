// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<crate::diagnostics::ExportError> for Error {
    fn from(err: crate::diagnostics::ExportError) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk full".into());
        assert_eq!(format!("{}", err), "I/O Error: disk full");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(message) => assert!(message.contains("denied")),
            _ => panic!("expected io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad value".into());
        assert_eq!(format!("{}", err), "Config Error: bad value");
    }

    #[test]
    fn toml_parse_error_maps_to_config_variant() {
        let parse_err = toml::from_str::<toml::Table>("key = [").unwrap_err();
        assert!(matches!(Error::from(parse_err), Error::Config(_)));
    }

    #[test]
    fn export_error_maps_to_io_variant() {
        let export_err =
            crate::diagnostics::ExportError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(Error::from(export_err), Error::Io(message) if message.contains("gone")));
    }
}

use mica_codec::error::CodecError;
use std::sync::PoisonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Invalid coordinate: local x {x} / z {z} must be within 0..16")]
    InvalidCoordinate { x: i32, z: i32 },

    #[error("Poisoned lock: {0}")]
    PoisonedLock(String),

    #[error("Unable to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Unable to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Unable to serialize TOML: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl Error {
    /// The codec error underneath any chunk annotation, if this is a decode failure.
    pub fn codec_root(&self) -> Option<&CodecError> {
        match self {
            Error::Codec(e) => Some(e.root()),
            _ => None,
        }
    }
}

// for any PoisonError in Result<T>
impl<T> From<PoisonError<T>> for Error {
    fn from(e: PoisonError<T>) -> Self {
        Error::PoisonedLock(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

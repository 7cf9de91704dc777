use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Buffer overflow: no room for a 2 byte header at offset {offset} of {length}")]
    BufferOverflow { offset: usize, length: usize },

    #[error("Runtime id {0} does not fit in a single byte")]
    IdTooWide(u32),

    #[error("Can't parse field {field}: {source}")]
    CantParseField {
        field: String,

        source: Box<CodecError>,
    },

    #[error("Chunk ({x}, {z}): {source}")]
    AtChunk {
        x: i32,
        z: i32,

        source: Box<CodecError>,
    },
}

impl CodecError {
    pub fn too_short() -> Self {
        CodecError::InvalidPayload {
            reason: "too short".to_string(),
        }
    }

    /// Attaches chunk coordinates. The wrapped error stays reachable through [`CodecError::root`].
    pub fn at_chunk(self, x: i32, z: i32) -> Self {
        CodecError::AtChunk {
            x,
            z,
            source: Box::new(self),
        }
    }

    /// The innermost error, with every context layer peeled off.
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::CantParseField { source, .. } | CodecError::AtChunk { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    pub fn chunk(&self) -> Option<(i32, i32)> {
        match self {
            CodecError::AtChunk { x, z, .. } => Some((*x, *z)),
            CodecError::CantParseField { source, .. } => source.chunk(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[test]
fn root_peels_context() {
    let err = CodecError::BufferOverflow {
        offset: 4,
        length: 5,
    }
    .at_chunk(2, -3);

    assert_eq!(err.chunk(), Some((2, -3)));
    assert!(matches!(
        err.root(),
        CodecError::BufferOverflow {
            offset: 4,
            length: 5
        }
    ));
    assert_eq!(
        err.to_string(),
        "Chunk (2, -3): Buffer overflow: no room for a 2 byte header at offset 4 of 5"
    );
}

#[test]
fn root_of_plain_error_is_itself() {
    let err = CodecError::too_short();
    assert!(err.chunk().is_none());
    assert!(matches!(err.root(), CodecError::InvalidPayload { reason } if reason == "too short"));
}

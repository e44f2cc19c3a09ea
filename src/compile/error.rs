use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The definition cannot be rendered; no partial bundle is produced.
    #[error("invalid survey definition: question {position}: {reason}")]
    InvalidDefinition { position: usize, reason: String },
    #[error("malformed survey document: {0}")]
    Malformed(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for CompileError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful message in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::Template(message)
    }
}

use std::fmt;

/// Conversion error — the single error kind surfaced to callers.
///
/// Deliberately coarse: two variants, both carrying the cause's message
/// text. Unmatched fields are never an error (they are silently skipped),
/// so anything that surfaces here means the caller got no usable target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The target shape could not be instantiated with zero arguments.
    #[error("construction error: {0}")]
    Construction(String),

    /// A matched field could not be read from the source or written to the
    /// target through the erased accessors.
    #[error("access error: {0}")]
    Access(String),
}

impl MapError {
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    pub fn access(msg: impl Into<String>) -> Self {
        Self::Access(msg.into())
    }

    /// Add context to the error, preserving the variant.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            MapError::Construction(msg) => MapError::Construction(format!("{ctx}: {msg}")),
            MapError::Access(msg) => MapError::Access(format!("{ctx}: {msg}")),
        }
    }
}

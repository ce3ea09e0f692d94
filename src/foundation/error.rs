/// Convenience result type used across jcutter.
pub type JcutResult<T> = Result<T, JcutError>;

/// Top-level error taxonomy.
///
/// Parsing is fail-fast: the first [`JcutError::Schema`] or [`JcutError::Format`] rejects the
/// whole document. Non-fatal conditions (such as unpaired clips) are reported as values, not
/// errors.
#[derive(thiserror::Error, Debug)]
pub enum JcutError {
    /// A required field is absent or the node has an unexpected shape.
    #[error("schema error: {entity}.{field}: {message}")]
    Schema {
        /// Entity being parsed (e.g. `Clip`).
        entity: &'static str,
        /// Offending field name.
        field: String,
        /// What was wrong with the field.
        message: String,
    },

    /// A leaf value failed primitive decoding.
    #[error("format error: {field}: cannot decode {value:?} as {expected}")]
    Format {
        /// Field holding the leaf.
        field: String,
        /// Raw leaf text.
        value: String,
        /// Expected primitive kind.
        expected: &'static str,
    },

    /// A document or option violates a semantic invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Markup text could not be read or written.
    #[error("markup error: {0}")]
    Markup(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JcutError {
    /// Build a [`JcutError::Schema`] for a missing field.
    pub fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        Self::Schema {
            entity,
            field: field.into(),
            message: "required field is missing".to_string(),
        }
    }

    /// Build a [`JcutError::Schema`] for a field with the wrong node shape.
    pub fn shape(entity: &'static str, field: impl Into<String>, expected: &str) -> Self {
        Self::Schema {
            entity,
            field: field.into(),
            message: format!("expected {expected}"),
        }
    }

    /// Build a [`JcutError::Format`] value.
    pub fn format(field: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Build a [`JcutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`JcutError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Return `true` for errors raised while decoding a document tree.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::Format { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

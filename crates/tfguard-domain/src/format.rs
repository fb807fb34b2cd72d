use crate::error::FormatError;

/// Canonical formatter for HCL text.
///
/// Implementations must be deterministic and must not change the meaning of
/// the text, only its whitespace and layout.
pub trait Formatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, FormatError> + Send + Sync,
{
    fn format(&self, source: &str) -> Result<String, FormatError> {
        self(source)
    }
}

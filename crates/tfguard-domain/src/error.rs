use std::error::Error as _;
use std::fmt;
use tfguard_types::RepoPath;
use thiserror::Error;

/// The canonical formatter rejected its input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A rule could not finish checking one file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("{path}: content unavailable: {reason}")]
    Read { path: RepoPath, reason: String },

    #[error("{path}:{line}: `{kind}` block has no name label")]
    MissingLabel {
        path: RepoPath,
        kind: String,
        line: u32,
    },

    #[error("{path}: cannot format recommended block order")]
    Format {
        path: RepoPath,
        #[source]
        source: FormatError,
    },
}

impl CheckError {
    pub fn path(&self) -> &RepoPath {
        match self {
            CheckError::Read { path, .. }
            | CheckError::MissingLabel { path, .. }
            | CheckError::Format { path, .. } => path,
        }
    }

    /// Display text including the source chain.
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

/// Errors collected across files while a rule keeps going.
///
/// Each entry keeps its own file path, so callers can report them per file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiError {
    errors: Vec<CheckError>,
}

impl MultiError {
    /// `Ok(())` when `errors` is empty, otherwise all of them wrapped together.
    pub fn from_errors(errors: Vec<CheckError>) -> Result<(), MultiError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(MultiError { errors })
        }
    }

    pub fn errors(&self) -> &[CheckError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<CheckError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} {} occurred:", self.errors.len(), noun)?;
        for err in &self.errors {
            write!(f, "\n\t* {}", err.detail())?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

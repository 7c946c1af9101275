//! Unified error types for recipe-intel.
//!
//! Request-time operations never fail; these errors surface only while
//! loading data, rule tables, model artifacts and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for recipe-intel operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecipeIntelError {
    /// Errors while loading the recipe catalog
    #[error("Failed to load recipe catalog: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors while loading or evaluating an optional model
    #[error("Model operation failed: {context}")]
    Model {
        context: String,
        #[source]
        source: ModelErrorKind,
    },

    /// Errors while loading association or substitute rules
    #[error("Invalid rule table: {context}")]
    Rules {
        context: String,
        #[source]
        source: RulesErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Expected a list of recipe records")]
    NotAList,

    #[error("Source contained no usable recipes")]
    Empty,
}

/// Specific model error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ModelErrorKind {
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Inference exceeded budget of {budget_ms}ms (took {elapsed_ms}ms)")]
    BudgetExceeded { budget_ms: u64, elapsed_ms: u64 },

    #[error("Model support not compiled in (enable the `{0}` feature)")]
    FeatureDisabled(&'static str),
}

/// Specific rule table error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RulesErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Rule key is empty after normalization (entry {0})")]
    EmptyKey(usize),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for recipe-intel operations
pub type Result<T> = std::result::Result<T, RecipeIntelError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RecipeIntelError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create a model error with context
    pub fn model(context: impl Into<String>, source: ModelErrorKind) -> Self {
        Self::Model {
            context: context.into(),
            source,
        }
    }

    /// Create a model error for a missing artifact
    pub fn artifact_not_found(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::model("loading artifact", ModelErrorKind::ArtifactNotFound(path))
    }

    /// Create an inference error
    pub fn inference(message: impl Into<String>) -> Self {
        Self::model("inference", ModelErrorKind::InferenceFailed(message.into()))
    }

    /// Create a rules error with context
    pub fn rules(context: impl Into<String>, source: RulesErrorKind) -> Self {
        Self::Rules {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error means an optional artifact simply is not there.
    #[must_use]
    pub const fn is_absent_artifact(&self) -> bool {
        matches!(
            self,
            Self::Model {
                source: ModelErrorKind::ArtifactNotFound(_) | ModelErrorKind::FeatureDisabled(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RecipeIntelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RecipeIntelError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog(
            "JSON deserialization",
            CatalogErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, e.g.
/// `"loading ranker: reading artifact: <io error>"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on error).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RecipeIntelError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: RecipeIntelError, new_ctx: &str) -> RecipeIntelError {
    match err {
        RecipeIntelError::Catalog {
            context: existing,
            source,
        } => RecipeIntelError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecipeIntelError::Model {
            context: existing,
            source,
        } => RecipeIntelError::Model {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecipeIntelError::Rules {
            context: existing,
            source,
        } => RecipeIntelError::Rules {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecipeIntelError::Io {
            path,
            message,
            source,
        } => RecipeIntelError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RecipeIntelError::Config(msg) => RecipeIntelError::Config(chain_context(new_ctx, &msg)),
        RecipeIntelError::Validation(msg) => {
            RecipeIntelError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Returns `"new: existing"`, or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RecipeIntelError::catalog("at recipes.json", CatalogErrorKind::NotAList);
        let display = err.to_string();
        assert!(display.contains("catalog"), "unexpected message: {display}");
        assert!(display.contains("recipes.json"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RecipeIntelError::io("/data/recipes.json", io_err);
        assert!(err.to_string().contains("/data/recipes.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(RecipeIntelError::model(
                "base",
                ModelErrorKind::MalformedArtifact("bad".into()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(RecipeIntelError::Model { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Model error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(RecipeIntelError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called);
    }

    #[test]
    fn test_absent_artifact_detection() {
        assert!(RecipeIntelError::artifact_not_found("/models/ranker.json").is_absent_artifact());
        assert!(!RecipeIntelError::inference("boom").is_absent_artifact());
    }
}

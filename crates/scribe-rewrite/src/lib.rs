//! Scribe rewrite crate - the writing-improvement collaborator seam.
//!
//! The editor submits its whole buffer and receives either a full
//! replacement draft or an error; nothing in between. The provider behind
//! the trait is supplied by the host; only adapters ship here, so the
//! core never knows whether a model, a local tool, or a test closure did
//! the rewriting.

use async_trait::async_trait;

use scribe_core::ScribeError;

/// Errors from the rewrite collaborator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RewriteError {
    /// The provider failed or could not be reached. The buffer is left
    /// untouched; no partial rewrite is ever applied.
    #[error("rewrite service unavailable: {0}")]
    Unavailable(String),
    /// Rewriting is switched off in configuration.
    #[error("rewrite is disabled")]
    Disabled,
}

impl From<RewriteError> for ScribeError {
    fn from(err: RewriteError) -> Self {
        ScribeError::Rewrite(err.to_string())
    }
}

/// A service that rewrites a draft into an improved version.
///
/// Implementations may be slow; callers await the full replacement text.
#[async_trait]
pub trait RewriteService: Send + Sync {
    async fn improve(&self, text: &str) -> Result<String, RewriteError>;
}

/// Adapter wrapping a synchronous closure as a [`RewriteService`].
///
/// Used by tests and by hosts whose provider call is already resolved by
/// the time it reaches the editor.
pub struct FnRewriter<F>
where
    F: Fn(&str) -> Result<String, RewriteError> + Send + Sync,
{
    f: F,
}

impl<F> FnRewriter<F>
where
    F: Fn(&str) -> Result<String, RewriteError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> RewriteService for FnRewriter<F>
where
    F: Fn(&str) -> Result<String, RewriteError> + Send + Sync,
{
    async fn improve(&self, text: &str) -> Result<String, RewriteError> {
        (self.f)(text)
    }
}

/// A service that always reports [`RewriteError::Disabled`].
///
/// Stands in when configuration turns the improve action off, so callers
/// need no separate enabled check.
pub struct UnavailableRewriter;

#[async_trait]
impl RewriteService for UnavailableRewriter {
    async fn improve(&self, _text: &str) -> Result<String, RewriteError> {
        Err(RewriteError::Disabled)
    }
}

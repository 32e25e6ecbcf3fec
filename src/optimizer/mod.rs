//! Optimizer adapter.
//!
//! Icon markup is rewritten before parsing so that many independently
//! authored icons can live in one document:
//!
//! - every internal `id` and class name gets a `<prefix>__` namespace
//! - references to those ids follow the rename, except references to
//!   shared fragments whose id starts with `icon-`
//! - in [`PaintMode::Mono`], paint attributes are stripped so the icon can
//!   be recoloured through a CSS mask
//!
//! The rewrite itself sits behind the [`Optimizer`] trait. [`Normalizer`]
//! is the built-in implementation.

mod normalize;
mod prefix;

use thiserror::Error;

pub use normalize::Normalizer;
pub use prefix::{prefix_class_list, prefix_css, prefix_reference, prefix_urls, SHARED_FRAGMENT_PREFIX};

/// How paint attributes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintMode {
    /// Strip fill/stroke so the icon works as a mask.
    Mono,
    /// Keep paint attributes unchanged.
    Color,
}

impl PaintMode {
    pub fn name(&self) -> &'static str {
        match self {
            PaintMode::Mono => "mono",
            PaintMode::Color => "color",
        }
    }
}

/// Per-icon optimizer configuration.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions<'a> {
    /// Namespace prefix, normally the icon id.
    pub id_prefix: &'a str,
    pub mode: PaintMode,
}

impl<'a> OptimizeOptions<'a> {
    pub fn new(id_prefix: &'a str, mode: PaintMode) -> Self {
        Self { id_prefix, mode }
    }
}

/// Error reported by an optimizer. The caller attaches the file path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct OptimizeError {
    pub message: String,
}

impl OptimizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rewrites raw icon markup under a declared configuration.
///
/// Implementations must be pure: the same input and options always give
/// the same output. Icons of one group are optimized concurrently.
pub trait Optimizer: Send + Sync {
    fn optimize(&self, markup: &str, options: &OptimizeOptions<'_>) -> Result<String, OptimizeError>;
}

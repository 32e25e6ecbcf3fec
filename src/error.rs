use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal errors. Any of these aborts the whole run.
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(iconsprite::io))]
    Io { path: PathBuf, message: String },

    #[error("Failed to optimize {path}: {message}")]
    #[diagnostic(code(iconsprite::optimize))]
    Optimize { path: PathBuf, message: String },

    #[error("Malformed SVG markup in {path}: {message}")]
    #[diagnostic(code(iconsprite::markup))]
    Markup { path: PathBuf, message: String },

    #[error("SVG viewBox not found in file {path}")]
    #[diagnostic(
        code(iconsprite::geometry::missing_viewbox),
        help("Every icon needs a viewBox on its root <svg> element")
    )]
    MissingViewBox { path: PathBuf },

    #[error("Invalid viewBox \"{view_box}\" in {path}: {message}")]
    #[diagnostic(code(iconsprite::geometry::invalid))]
    InvalidGeometry {
        path: PathBuf,
        view_box: String,
        message: String,
    },

    #[error("Duplicate icon id '{id}' ({first} and {second})")]
    #[diagnostic(
        code(iconsprite::catalog::duplicate_id),
        help("Rename one of the source files so their normalized names differ")
    )]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Error generating {path}: {message}")]
    #[diagnostic(code(iconsprite::write))]
    Write { path: PathBuf, message: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(iconsprite::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Refusing to reset output directory {path}: {message}")]
    #[diagnostic(
        code(iconsprite::output::unsafe_path),
        help("Point `output` in iconsprite.yaml at a dedicated build directory")
    )]
    UnsafeOutput { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SpriteError>;

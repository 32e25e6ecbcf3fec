//! iconsprite - SVG icon sprite compiler
//!
//! Compiles a directory of SVG icons into one sprite document with an
//! addressable `<view>` per icon, plus a JSON catalog, SCSS mixins and an
//! HTML preview, all derived from one shared layout.
//!
//! ```ignore
//! use iconsprite::{discover, pipeline, Normalizer};
//!
//! let project = discover(".")?;
//! let summary = pipeline::run(&project, &Normalizer)?;
//! println!("{} icons", summary.icon_count());
//! ```

pub mod catalog;
pub mod cli;
pub mod diagnostic;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod layout;
pub mod optimizer;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use catalog::{build_catalog, Catalog, CatalogBuild, IconGroup};
pub use diagnostic::Diagnostic;
pub use discovery::{discover, ArtifactPaths, Manifest, Project, SourceLayout};
pub use emit::{render_catalog, render_mixins, render_preview, render_sprite, render_styles, write_artifacts};
pub use error::{Result, SpriteError};
pub use layout::{layout, layout_group, CompositeLayout, GroupLayout, LayoutTile, GAP};
pub use optimizer::{Normalizer, OptimizeError, OptimizeOptions, Optimizer, PaintMode};
pub use parser::{extract_defs, load_icon, parse_icon, DefsSplit, IconRecord};
pub use pipeline::BuildSummary;

//! Icon parsing.
//!
//! Each source file becomes one [`IconRecord`]. The optimized markup is
//! parsed into a tree once; geometry comes from the root element's
//! `viewBox`, the body from the root's content, and shared definitions
//! from every `<defs>` block in it.
//!
//! # Usage
//!
//! ```ignore
//! use iconsprite::catalog::IconGroup;
//! use iconsprite::optimizer::Normalizer;
//! use iconsprite::parser::load_icon;
//!
//! let icon = load_icon(Path::new("icons-source/home.svg"), IconGroup::Mono, &Normalizer)?;
//! println!("{} is {}x{}", icon.id, icon.width, icon.height);
//! ```

pub mod defs;
mod icon;

pub use defs::{extract_defs, DefsSplit};
pub use icon::{icon_id, icon_name, load_icon, parse_icon, IconRecord};

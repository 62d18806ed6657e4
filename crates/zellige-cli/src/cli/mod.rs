//! CLI command implementations.
//!
//! - `render` - generate a pattern from flags
//! - `recipe` - generate from a declarative YAML recipe
//! - `palettes` - list built-in palettes (lives in `main`)

pub mod output;
pub mod recipe;
pub mod render;

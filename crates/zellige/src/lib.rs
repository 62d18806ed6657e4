//! # zellige
//!
//! Procedural generation of Islamic geometric star patterns ("zellij")
//! using the polygons-in-contact method: a seeded arrangement of full-plane
//! lines on a discrete grid partitions the plane into polygonal tiles, and
//! each tile is decorated with a motif matched by its corner signature.
//!
//! The engine is pure and synchronous: [`generate`] takes a configuration
//! record and a filler library and returns an ordered list of colored
//! polygons in canvas coordinates. Rendering, persistence and UI concerns
//! live with the caller.

pub mod color;
pub mod fillers;
pub mod geometry;
pub mod grid;
pub mod lines;
pub mod motifs;
pub mod palette;
pub mod render;
pub mod rng;
pub mod signature;
pub mod trace;

// Re-export common types at crate root for convenience.
pub use fillers::{Cluster, FillerLibrary, FillerShape, LibraryError};
pub use geometry::{fill_box, match_seg, match_two_segs, Affine, Point, Rect};
pub use lines::{Features, Focus, Line};
pub use palette::Palette;
pub use render::{generate, generate_with_features, GenerateError, RenderOptions, RenderedShape};
pub use rng::Rng;
pub use signature::{Corner, Signature};
pub use trace::Tile;

//! The filler-motif library: decorative clusters keyed by corner signature.
//!
//! The on-disk form is a JSON mapping from signature string to a list of
//! clusters, each declaring the reference edge its shapes were authored
//! against and the shapes themselves (flat coordinate list plus a palette
//! colour index). Extra entries the engine never looks up are harmless;
//! a missing entry means the tile goes undecorated.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One decorative sub-shape of a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerShape {
    /// Flat coordinate list `[x0, y0, x1, y1, …]` in the cluster's
    /// authoring frame.
    pub path: Vec<f64>,
    /// Palette colour index, 0–4 (clamped against the palette at render
    /// time).
    #[serde(rename = "colourIndex")]
    pub colour_index: u8,
}

/// A pre-authored decoration for one tile signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Reference edge `(fv, fw)` as `[fv.x, fv.y, fw.x, fw.y]`; the affine
    /// placement maps it onto the tile's matched edge.
    pub bounds: [f64; 4],
    pub shapes: Vec<FillerShape>,
}

impl Cluster {
    /// The reference edge the cluster's shapes are authored against.
    #[inline]
    pub fn reference_edge(&self) -> (Point, Point) {
        (
            Point::new(self.bounds[0], self.bounds[1]),
            Point::new(self.bounds[2], self.bounds[3]),
        )
    }
}

/// Malformed library data, detected by [`FillerLibrary::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    /// A cluster's reference edge has (near) zero length, which would make
    /// its placement transform singular.
    DegenerateBounds { signature: String },
    /// A shape's flat coordinate list has odd length.
    OddPathLength { signature: String },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DegenerateBounds { signature } => {
                write!(f, "cluster for '{}' has a zero-length reference edge", signature)
            }
            LibraryError::OddPathLength { signature } => {
                write!(f, "cluster for '{}' has a shape with an odd coordinate count", signature)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A signature-keyed collection of clusters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillerLibrary {
    entries: HashMap<String, Vec<Cluster>>,
}

impl FillerLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in motif table covering the signature classes the tracer
    /// produces.
    pub fn builtin() -> Self {
        crate::motifs::builtin_library()
    }

    #[inline]
    pub fn contains(&self, signature: &str) -> bool {
        self.entries.contains_key(signature)
    }

    #[inline]
    pub fn get(&self, signature: &str) -> Option<&[Cluster]> {
        self.entries.get(signature).map(|c| c.as_slice())
    }

    /// Add a cluster under a signature key.
    pub fn insert(&mut self, signature: impl Into<String>, cluster: Cluster) {
        self.entries.entry(signature.into()).or_default().push(cluster);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every cluster for data defects that would otherwise surface
    /// mid-generation as singular transforms.
    pub fn validate(&self) -> Result<(), LibraryError> {
        for (signature, clusters) in &self.entries {
            for cluster in clusters {
                let (fv, fw) = cluster.reference_edge();
                if fv.distance(fw) < 1e-9 {
                    return Err(LibraryError::DegenerateBounds { signature: signature.clone() });
                }
                for shape in &cluster.shapes {
                    if shape.path.len() % 2 != 0 {
                        return Err(LibraryError::OddPathLength { signature: signature.clone() });
                    }
                }
            }
        }
        Ok(())
    }
}

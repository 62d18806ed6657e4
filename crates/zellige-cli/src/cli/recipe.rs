//! Declarative render recipes.
//!
//! Recipes are YAML files describing a complete render: seed, canvas,
//! palette, shimmer, filler library and outputs.
//!
//! ```yaml
//! name: courtyard wall
//! seed: 20260807
//! canvas:
//!   width: 1200
//!   height: 800
//! palette: Marrakech
//! shimmer: 3
//! output: wall.svg
//! png: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zellige::{Palette, RenderOptions};

use super::render::{run, RenderJob};

/// A complete recipe for one render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title.
    pub name: String,

    /// Generation seed; random when omitted.
    #[serde(default)]
    pub seed: Option<u32>,

    /// Canvas configuration.
    pub canvas: Canvas,

    /// Built-in palette name.
    #[serde(default)]
    pub palette: Option<String>,

    /// Explicit colors; takes precedence over `palette`.
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    /// Shimmer level (-1 = off).
    #[serde(default = "default_shimmer")]
    pub shimmer: i32,

    /// Path to a filler-library JSON file; built-in motifs when omitted.
    #[serde(default)]
    pub fillers: Option<String>,

    /// Output SVG path.
    pub output: String,

    /// Also rasterize a PNG next to the SVG.
    #[serde(default)]
    pub png: bool,
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

fn default_shimmer() -> i32 {
    -1
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read recipe file: {}", e))?;
        serde_yaml::from_str(&content).map_err(|e| format!("Failed to parse recipe YAML: {}", e))
    }

    /// Resolve the recipe's palette to the five-color list.
    pub fn resolve_palette(&self) -> Result<Vec<String>, String> {
        if let Some(colors) = &self.colors {
            return Ok(colors.clone());
        }
        let name = self.palette.as_deref().unwrap_or("Fes Blue");
        Palette::by_name(name)
            .map(|p| p.to_colors())
            .ok_or_else(|| format!("Unknown palette '{}'", name))
    }

    /// Turn the recipe into a runnable job.
    pub fn into_job(self) -> Result<RenderJob, String> {
        let palette = self.resolve_palette()?;
        Ok(RenderJob {
            options: RenderOptions {
                seed: self.seed.unwrap_or_else(rand::random::<u32>),
                width: self.canvas.width,
                height: self.canvas.height,
                palette,
                shimmer: self.shimmer,
            },
            fillers: self.fillers,
            output: self.output,
            png: self.png,
            json: false,
        })
    }
}

pub fn cmd_recipe(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Usage: zellige recipe <file.yaml>");
        std::process::exit(1);
    };

    let result = Recipe::load(path)
        .and_then(|recipe| {
            println!("Rendering recipe '{}'", recipe.name);
            recipe.into_job()
        })
        .and_then(|job| run(&job));

    if let Err(msg) = result {
        eprintln!("{}", msg);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name: test wall
seed: 7
canvas:
  width: 640
  height: 480
palette: Emerald
shimmer: 2
output: wall.svg
"#;

    #[test]
    fn parses_yaml_recipe() {
        let recipe: Recipe = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(recipe.name, "test wall");
        assert_eq!(recipe.seed, Some(7));
        assert_eq!(recipe.canvas.width, 640.0);
        assert_eq!(recipe.shimmer, 2);
        assert!(!recipe.png);
    }

    #[test]
    fn defaults_apply() {
        let minimal = r#"
name: minimal
canvas: { width: 400, height: 400 }
output: out.svg
"#;
        let recipe: Recipe = serde_yaml::from_str(minimal).unwrap();
        assert_eq!(recipe.seed, None);
        assert_eq!(recipe.shimmer, -1);
        assert!(recipe.palette.is_none());
        assert_eq!(recipe.resolve_palette().unwrap().len(), 5);
    }

    #[test]
    fn explicit_colors_take_precedence() {
        let recipe: Recipe = serde_yaml::from_str(SAMPLE).unwrap();
        let mut recipe = recipe;
        recipe.colors = Some(vec!["#111111".to_string(); 5]);
        assert_eq!(recipe.resolve_palette().unwrap()[0], "#111111");
    }

    #[test]
    fn into_job_carries_canvas() {
        let recipe: Recipe = serde_yaml::from_str(SAMPLE).unwrap();
        let job = recipe.into_job().unwrap();
        assert_eq!(job.options.seed, 7);
        assert_eq!(job.options.width, 640.0);
        assert_eq!(job.options.palette[0], "#0d2818");
        assert_eq!(job.output, "wall.svg");
    }

    #[test]
    fn unknown_palette_fails() {
        let recipe: Recipe = serde_yaml::from_str(SAMPLE).unwrap();
        let mut recipe = recipe;
        recipe.palette = Some("Taupe".to_string());
        assert!(recipe.into_job().is_err());
    }
}

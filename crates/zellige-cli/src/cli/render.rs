//! The `render` subcommand: flag parsing, filler-library loading, and
//! output emission.

use std::fs;

use chrono::Local;
use zellige::{generate, FillerLibrary, Palette, RenderOptions};

use super::output::{shapes_to_json, shapes_to_svg, write_png};

/// Everything one generation run needs, shared between `render` and
/// `recipe`.
pub struct RenderJob {
    pub options: RenderOptions,
    /// Path to a filler-library JSON file; built-in motifs when absent.
    pub fillers: Option<String>,
    /// Output SVG path.
    pub output: String,
    pub png: bool,
    pub json: bool,
}

pub fn cmd_render(args: &[String]) {
    let job = match parse_args(args) {
        Ok(job) => job,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'zellige help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(msg) = run(&job) {
        eprintln!("{}", msg);
        std::process::exit(1);
    }
}

/// Execute a render job: load the library, generate, and write outputs.
pub fn run(job: &RenderJob) -> Result<(), String> {
    let library = match &job.fillers {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read filler library {}: {}", path, e))?;
            let library: FillerLibrary = serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse filler library {}: {}", path, e))?;
            library
                .validate()
                .map_err(|e| format!("Invalid filler library {}: {}", path, e))?;
            library
        }
        None => FillerLibrary::builtin(),
    };

    let shapes = generate(&job.options, &library).map_err(|e| e.to_string())?;
    println!(
        "Generated {} shapes (seed {})",
        shapes.len(),
        job.options.seed
    );

    let svg = shapes_to_svg(&shapes, &job.options);
    fs::write(&job.output, &svg)
        .map_err(|e| format!("Failed to write {}: {}", job.output, e))?;
    println!("Wrote {}", job.output);

    if job.png {
        let png_path = swap_extension(&job.output, "png");
        write_png(
            &svg,
            job.options.width.round() as u32,
            job.options.height.round() as u32,
            &png_path,
        )?;
        println!("Wrote {}", png_path);
    }

    if job.json {
        let json_path = swap_extension(&job.output, "json");
        fs::write(&json_path, shapes_to_json(&shapes)?)
            .map_err(|e| format!("Failed to write {}: {}", json_path, e))?;
        println!("Wrote {}", json_path);
    }

    Ok(())
}

fn swap_extension(path: &str, ext: &str) -> String {
    match path.rsplit_once('.') {
        Some((stem, _)) => format!("{}.{}", stem, ext),
        None => format!("{}.{}", path, ext),
    }
}

fn parse_args(args: &[String]) -> Result<RenderJob, String> {
    let mut seed: Option<u32> = None;
    let mut width = 800.0;
    let mut height = 600.0;
    let mut palette_name = "Fes Blue".to_string();
    let mut colors: Option<Vec<String>> = None;
    let mut shimmer = -1i32;
    let mut fillers: Option<String> = None;
    let mut output: Option<String> = None;
    let mut png = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" | "-s" => seed = Some(parse_value(args, &mut i, "seed")?),
            "--width" | "-w" => width = parse_value(args, &mut i, "width")?,
            "--height" | "-h" => height = parse_value(args, &mut i, "height")?,
            "--palette" | "-p" => palette_name = take_value(args, &mut i, "palette")?,
            "--colors" => {
                let list = take_value(args, &mut i, "colors")?;
                colors = Some(list.split(',').map(|s| s.trim().to_string()).collect());
            }
            "--shimmer" => shimmer = parse_value(args, &mut i, "shimmer")?,
            "--fillers" => fillers = Some(take_value(args, &mut i, "fillers")?),
            "--out" | "-o" => output = Some(take_value(args, &mut i, "out")?),
            "--png" => png = true,
            "--json" => json = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
        i += 1;
    }

    let palette = match colors {
        Some(colors) => colors,
        None => Palette::by_name(&palette_name)
            .ok_or_else(|| format!("Unknown palette '{}'", palette_name))?
            .to_colors(),
    };

    let seed = seed.unwrap_or_else(rand::random::<u32>);
    let output = output.unwrap_or_else(|| {
        format!(
            "zellige-{}-{}.svg",
            seed,
            Local::now().format("%Y%m%d-%H%M%S")
        )
    });

    Ok(RenderJob {
        options: RenderOptions { seed, width, height, palette, shimmer },
        fillers,
        output,
        png,
        json,
    })
}

fn take_value(args: &[String], i: &mut usize, name: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("Missing value for --{}", name))
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    i: &mut usize,
    name: &str,
) -> Result<T, String> {
    let raw = take_value(args, i, name)?;
    raw.parse()
        .map_err(|_| format!("Invalid value '{}' for --{}", raw, name))
}

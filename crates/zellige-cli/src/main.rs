//! zellige - CLI for zellige pattern generation
//!
//! Usage:
//!   zellige render [options]      Generate a pattern (SVG, optionally PNG)
//!   zellige recipe <file.yaml>    Render from a recipe file
//!   zellige palettes              List built-in palettes

use std::env;

mod cli;

use cli::recipe::cmd_recipe;
use cli::render::cmd_render;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "render" => {
                cmd_render(&args[2..]);
                return;
            }
            "recipe" => {
                cmd_recipe(&args[2..]);
                return;
            }
            "palettes" => {
                cmd_palettes();
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown command '{}'", other);
                eprintln!();
            }
        }
    }

    print_usage(args.first().map(String::as_str).unwrap_or("zellige"));
    std::process::exit(1);
}

fn cmd_palettes() {
    println!("Available palettes:");
    for p in zellige::Palette::all() {
        println!("  {:<12} {}", p.name, p.colors.join(" "));
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  render      Generate a pattern");
    println!("  recipe      Render from a YAML recipe file");
    println!("  palettes    List built-in palettes");
    println!("  help        Show this help");
    println!();
    println!("Render options:");
    println!("  -s, --seed <n>        Generation seed (default: random)");
    println!("  -w, --width <px>      Canvas width (default: 800)");
    println!("  -h, --height <px>     Canvas height (default: 600)");
    println!("  -p, --palette <name>  Built-in palette name (default: Fes Blue)");
    println!("      --colors <c0..c4> Five comma-separated hex colors");
    println!("      --shimmer <n>     Shimmer level, -1 = off (default: -1)");
    println!("      --fillers <file>  Filler library JSON (default: built-in)");
    println!("  -o, --out <file>      Output SVG path (default: timestamped)");
    println!("      --png             Also rasterize a PNG next to the SVG");
    println!("      --json            Also dump the shape list as JSON");
    println!();
    println!("Examples:");
    println!("  {} render --seed 42 -p Marrakech -o tiles.svg", program);
    println!("  {} render --shimmer 3 --png", program);
    println!("  {} recipe wall.yaml", program);
}

//! Integration tests for the zellige CLI.
//!
//! These run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Get the path to the zellige binary from the workspace target directory.
fn binary_path() -> Option<PathBuf> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates/zellige-cli -> crates
    path.pop(); // crates -> workspace root

    let release = path.join("target/release/zellige");
    if release.exists() {
        return Some(release);
    }
    let debug = path.join("target/debug/zellige");
    if debug.exists() {
        return Some(debug);
    }
    None
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("zellige-test-{}-{}", std::process::id(), name));
    path
}

#[test]
fn palettes_command_lists_builtins() {
    let Some(bin) = binary_path() else {
        eprintln!("Skipping test - binary not built yet");
        return;
    };

    let output = Command::new(bin)
        .arg("palettes")
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Fes Blue"), "Should list 'Fes Blue'");
    assert!(stdout.contains("Marrakech"), "Should list 'Marrakech'");
    assert!(stdout.contains("Ocean"), "Should list 'Ocean'");
    assert!(stdout.contains("#1a1a2e"), "Should show colors");
}

#[test]
fn render_command_writes_svg() {
    let Some(bin) = binary_path() else {
        eprintln!("Skipping test - binary not built yet");
        return;
    };

    let out = temp_path("render.svg");
    let status = Command::new(bin)
        .args([
            "render",
            "--seed",
            "42",
            "--width",
            "800",
            "--height",
            "600",
            "--out",
        ])
        .arg(&out)
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let svg = fs::read_to_string(&out).expect("output SVG should exist");
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<path"), "a seeded render should emit shapes");

    let _ = fs::remove_file(&out);
}

#[test]
fn render_is_deterministic_across_runs() {
    let Some(bin) = binary_path() else {
        eprintln!("Skipping test - binary not built yet");
        return;
    };

    let out1 = temp_path("det1.svg");
    let out2 = temp_path("det2.svg");
    for out in [&out1, &out2] {
        let status = Command::new(&bin)
            .args(["render", "--seed", "1234", "--shimmer", "3", "--out"])
            .arg(out)
            .status()
            .expect("Failed to execute command");
        assert!(status.success());
    }

    let a = fs::read(&out1).unwrap();
    let b = fs::read(&out2).unwrap();
    assert_eq!(a, b, "same seed must reproduce the same document");

    let _ = fs::remove_file(&out1);
    let _ = fs::remove_file(&out2);
}

#[test]
fn recipe_command_renders_file() {
    let Some(bin) = binary_path() else {
        eprintln!("Skipping test - binary not built yet");
        return;
    };

    let out = temp_path("recipe-out.svg");
    let recipe = temp_path("recipe.yaml");
    fs::write(
        &recipe,
        format!(
            "name: integration\nseed: 9\ncanvas:\n  width: 640\n  height: 480\npalette: Sahara\noutput: {}\n",
            out.display()
        ),
    )
    .unwrap();

    let status = Command::new(bin)
        .arg("recipe")
        .arg(&recipe)
        .status()
        .expect("Failed to execute command");
    assert!(status.success());
    assert!(out.exists());

    let _ = fs::remove_file(&out);
    let _ = fs::remove_file(&recipe);
}

#[test]
fn invalid_palette_fails_cleanly() {
    let Some(bin) = binary_path() else {
        eprintln!("Skipping test - binary not built yet");
        return;
    };

    let output = Command::new(bin)
        .args(["render", "--palette", "NotAPalette"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown palette"));
}

//! Named five-color palettes.
//!
//! Slot order is fixed: `[background, accent, fill1, fill2, fill3]`.
//! Shimmer only ever touches the fill slots.

/// A named palette of exactly five hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: [&'static str; 5],
}

impl Palette {
    /// All built-in palettes.
    pub fn all() -> &'static [Palette] {
        PALETTES
    }

    /// Look up a palette by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<&'static Palette> {
        PALETTES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The palette as owned strings, the form [`crate::RenderOptions`]
    /// carries.
    pub fn to_colors(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_string()).collect()
    }
}

const PALETTES: &[Palette] = &[
    Palette {
        name: "Fes Blue",
        colors: ["#1a1a2e", "#f0f0f0", "#0047ab", "#1e90ff", "#87ceeb"],
    },
    Palette {
        name: "Marrakech",
        colors: ["#2d1f0f", "#f5f0e1", "#c84c09", "#e67e22", "#f4a460"],
    },
    Palette {
        name: "Chefchaouen",
        colors: ["#1a3a4a", "#e8f4f8", "#4169e1", "#5dade2", "#aed6f1"],
    },
    Palette {
        name: "Sahara",
        colors: ["#3d2914", "#faf0e6", "#d2691e", "#daa520", "#f0e68c"],
    },
    Palette {
        name: "Emerald",
        colors: ["#0d2818", "#e8f5e9", "#006400", "#228b22", "#32cd32"],
    },
    Palette {
        name: "Royal",
        colors: ["#1a0a2e", "#f5f0ff", "#4b0082", "#8b008b", "#da70d6"],
    },
    Palette {
        name: "Terracotta",
        colors: ["#2b1810", "#faf5f0", "#8b4513", "#cd853f", "#deb887"],
    },
    Palette {
        name: "Ocean",
        colors: ["#0a1628", "#e6f3f5", "#006994", "#20b2aa", "#48d1cc"],
    },
];

//! Theme configuration and the seam through which it reaches the screen.
//!
//! The core stores and hands out an immutable [`ThemeConfig`]; applying it
//! (CSS variables, terminal colors, ...) is a [`ThemeApplier`]'s job.

use serde::{Deserialize, Serialize};

pub const MONOSPACE_STACK: &str =
    "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, 'Liberation Mono', 'Courier New', monospace";

/// Light-scheme default background (HSL components).
pub const LIGHT_BACKGROUND: &str = "0 0% 100%";
/// Dark-scheme default background.
pub const DARK_BACKGROUND: &str = "220 40% 10%";

/// Named primary colors and their HSL components.
pub const PRIMARY_HUES: [(&str, &str); 15] = [
    ("slate", "215 20% 65%"),
    ("zinc", "240 5% 65%"),
    ("stone", "25 5% 65%"),
    ("gray", "220 10% 65%"),
    ("neutral", "0 0% 65%"),
    ("red", "0 75% 60%"),
    ("rose", "330 70% 60%"),
    ("orange", "25 95% 55%"),
    ("green", "140 60% 50%"),
    ("blue", "210 100% 60%"),
    ("indigo", "240 70% 60%"),
    ("violet", "260 70% 60%"),
    ("purple", "270 70% 60%"),
    ("fuchsia", "290 90% 60%"),
    ("pink", "330 85% 60%"),
];

pub fn primary_hue(name: &str) -> Option<&'static str> {
    PRIMARY_HUES
        .iter()
        .find(|(color, _)| *color == name)
        .map(|(_, hue)| *hue)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    None,
    Dots,
    Grid,
    Waves,
}

impl BackgroundPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundPattern::None => "none",
            BackgroundPattern::Dots => "dots",
            BackgroundPattern::Grid => "grid",
            BackgroundPattern::Waves => "waves",
        }
    }

    /// Stylesheet class drawing the pattern; empty for none.
    pub fn css_class(self) -> &'static str {
        match self {
            BackgroundPattern::None => "",
            BackgroundPattern::Dots => "bg-pattern-dots",
            BackgroundPattern::Grid => "bg-pattern-grid",
            BackgroundPattern::Waves => "bg-pattern-waves",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Persisted under `custom-theme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub primary_color: String,
    pub font_family: String,
    pub border_radius: String,
    pub background_color: String,
    pub background_pattern: BackgroundPattern,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::for_scheme(ColorScheme::Light)
    }
}

impl ThemeConfig {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        Self {
            primary_color: "blue".to_string(),
            font_family: MONOSPACE_STACK.to_string(),
            border_radius: "0.5rem".to_string(),
            background_color: match scheme {
                ColorScheme::Light => LIGHT_BACKGROUND,
                ColorScheme::Dark => DARK_BACKGROUND,
            }
            .to_string(),
            background_pattern: BackgroundPattern::None,
        }
    }

    /// Swap the stock background for the other scheme's stock background.
    /// Custom backgrounds are left alone.
    pub fn adapted_to(&self, scheme: ColorScheme) -> Self {
        let mut next = self.clone();
        match scheme {
            ColorScheme::Dark if self.background_color == LIGHT_BACKGROUND => {
                next.background_color = DARK_BACKGROUND.to_string();
            }
            ColorScheme::Light if self.background_color == DARK_BACKGROUND => {
                next.background_color = LIGHT_BACKGROUND.to_string();
            }
            _ => {}
        }
        next
    }

    /// CSS custom properties for this theme. `--primary` is omitted when the
    /// color name is not in [`PRIMARY_HUES`].
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("--font-family", self.font_family.clone()),
            ("--radius", self.border_radius.clone()),
            ("--dashboard-bg", self.background_color.clone()),
            ("--dashboard-pattern", self.background_pattern.as_str().to_string()),
        ];
        if let Some(hue) = primary_hue(&self.primary_color) {
            vars.push(("--primary", hue.to_string()));
        }
        vars
    }
}

/// Renders a theme somewhere outside the core.
pub trait ThemeApplier {
    fn apply(&self, theme: &ThemeConfig);
}

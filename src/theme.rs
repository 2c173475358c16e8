//! Named palettes and the colors resolved from them.
//!
//! A palette maps fixed base-color names to hex strings and is otherwise
//! opaque input data. A [Theme] is the validated form: parsed colors plus the
//! derived variant table, rebuilt whenever the palette changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::color::{Rgb, VariantKind, VariantTable};
use crate::health::Health;

/// Base color the whole line falls back to when a name cannot be resolved.
pub const PRIMARY: &str = "primary";
/// Anchor color the first segment's left transition departs from.
pub const SESSION: &str = "session";
/// Concrete line background, used where a transparent foreground would vanish.
pub const BACKGROUND: &str = "background";
/// Neutral background of the synthetic cells inserted in spacing mode.
pub const SPACING: &str = "spacing";

const FALLBACK_PRIMARY: Rgb = Rgb { r: 0x8a, g: 0x8a, b: 0x8a };

/// Raw palette data: base color names to hex strings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Default for Palette {
    fn default() -> Self {
        Palette(
            [
                (PRIMARY, "#8a8a8a"),
                (SESSION, "#2e3440"),
                (BACKGROUND, "#1c1c1c"),
                (SPACING, "#303030"),
                ("info-base", "#5f87af"),
                ("ok-base", "#87af87"),
                ("good-base", "#5faf5f"),
                ("warning-base", "#d7af5f"),
                ("error-base", "#d75f5f"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
        )
    }
}

impl Palette {
    /// Read a TOML palette file: a flat table of `name = "#rrggbb"`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading palette {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing palette {}", path.display()))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// A validated palette plus its derived variant table.
#[derive(Clone, Debug)]
pub struct Theme {
    colors: BTreeMap<String, Rgb>,
    variants: VariantTable,
    primary: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(&Palette::default())
    }
}

impl Theme {
    /// Validate each palette entry; malformed entries are reported per key
    /// and skipped, never a whole-palette failure.
    pub fn new(palette: &Palette) -> Self {
        let mut colors = BTreeMap::new();
        for (name, hex) in palette.entries() {
            match Rgb::parse(hex) {
                Ok(color) => {
                    colors.insert(name.to_owned(), color);
                }
                Err(err) => warn!(key = name, error = %err, "ignoring palette entry"),
            }
        }
        let primary = colors.get(PRIMARY).copied().unwrap_or(FALLBACK_PRIMARY);
        Theme {
            variants: VariantTable::generate(palette.entries()),
            colors,
            primary,
        }
    }

    /// Look a base color up, falling back to the primary tone. A broken
    /// color name must never cause a broken line.
    pub fn resolve(&self, name: &str) -> Rgb {
        match self.colors.get(name) {
            Some(color) => *color,
            None => {
                warn!(key = name, "unresolvable color, using primary");
                self.primary
            }
        }
    }

    /// Derived shade of a base color. An unknown base takes the shade of the
    /// primary tone instead.
    pub fn variant(&self, name: &str, kind: VariantKind) -> Rgb {
        self.variants
            .get(name, kind)
            .unwrap_or_else(|| kind.apply(self.resolve(name)))
    }

    pub fn variants(&self) -> &VariantTable {
        &self.variants
    }

    /// Segment background for a severity level.
    pub fn health_bg(&self, health: Health) -> Rgb {
        self.resolve(health.base_key())
    }

    /// Segment foreground for a severity level: the lightest shade of its
    /// base, so text stays readable on the base background.
    pub fn health_fg(&self, health: Health) -> Rgb {
        self.variant(health.base_key(), VariantKind::Lightest)
    }

    pub fn session(&self) -> Rgb {
        self.resolve(SESSION)
    }

    pub fn background(&self) -> Rgb {
        self.resolve(BACKGROUND)
    }

    pub fn spacing(&self) -> Rgb {
        self.resolve(SPACING)
    }

    pub fn primary(&self) -> Rgb {
        self.primary
    }
}

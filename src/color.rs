use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("{0:?} is not a 6-digit hex color")]
    Malformed(String),
}

/// A truecolor value parsed from a `#rrggbb` palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse exactly six hex digits, with an optional leading `#`.
    ///
    /// Malformed input is an error, never a substituted default: palette
    /// consistency checks depend on bad entries staying visible.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(s.to_owned()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::Malformed(s.to_owned()))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Move every channel toward 255 by `percent` of the remaining distance.
    ///
    /// Integer arithmetic only; identical input yields identical output on
    /// every platform.
    #[must_use]
    pub fn lighter(self, percent: u8) -> Self {
        let percent = u32::from(percent.min(100));
        let step = |old: u8| -> u8 {
            let old = u32::from(old);
            (old + (255 - old) * percent / 100).min(255) as u8
        };
        Rgb {
            r: step(self.r),
            g: step(self.g),
            b: step(self.b),
        }
    }

    /// Scale every channel toward 0 by `percent`.
    #[must_use]
    pub fn darker(self, percent: u8) -> Self {
        let percent = u32::from(percent.min(100));
        let step = |old: u8| -> u8 { (u32::from(old) * (100 - percent) / 100).min(255) as u8 };
        Rgb {
            r: step(self.r),
            g: step(self.g),
            b: step(self.b),
        }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// `lighter("#336699", 50)` and friends, for callers that work in hex strings.
pub fn lighter(hex: &str, percent: u8) -> Result<String, ColorError> {
    Ok(Rgb::parse(hex)?.lighter(percent).to_string())
}

pub fn darker(hex: &str, percent: u8) -> Result<String, ColorError> {
    Ok(Rgb::parse(hex)?.darker(percent).to_string())
}

/// The six derived shades of a base color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Light,
    Lighter,
    Lightest,
    Dark,
    Darker,
    Darkest,
}

impl VariantKind {
    pub const ALL: [VariantKind; 6] = [
        VariantKind::Light,
        VariantKind::Lighter,
        VariantKind::Lightest,
        VariantKind::Dark,
        VariantKind::Darker,
        VariantKind::Darkest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Lighter => "lighter",
            Self::Lightest => "lightest",
            Self::Dark => "dark",
            Self::Darker => "darker",
            Self::Darkest => "darkest",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Lighter => 1,
            Self::Lightest => 2,
            Self::Dark => 3,
            Self::Darker => 4,
            Self::Darkest => 5,
        }
    }

    /// Fixed step table; the percentages are constants so two engines given
    /// the same palette agree byte-for-byte.
    #[must_use]
    pub fn apply(self, base: Rgb) -> Rgb {
        match self {
            Self::Light => base.lighter(25),
            Self::Lighter => base.lighter(50),
            Self::Lightest => base.lighter(75),
            Self::Dark => base.darker(25),
            Self::Darker => base.darker(50),
            Self::Darkest => base.darker(75),
        }
    }
}

/// Derived shades for every valid base color of the active palette.
///
/// Rebuilt whenever the palette changes; never carried across a palette
/// switch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantTable {
    shades: BTreeMap<String, [Rgb; 6]>,
}

impl VariantTable {
    /// Expand each `(name, hex)` entry into its six variants.
    ///
    /// Malformed entries are skipped and reported per key; one bad color
    /// never fails the whole palette.
    pub fn generate<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut shades = BTreeMap::new();
        for (name, hex) in entries {
            match Rgb::parse(hex) {
                Ok(base) => {
                    shades.insert(name.to_owned(), VariantKind::ALL.map(|kind| kind.apply(base)));
                }
                Err(err) => warn!(key = name, error = %err, "skipping palette entry"),
            }
        }
        VariantTable { shades }
    }

    pub fn get(&self, base: &str, kind: VariantKind) -> Option<Rgb> {
        Some(self.shades.get(base)?[kind.index()])
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.shades.keys().map(String::as_str)
    }
}

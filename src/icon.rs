use serde::Deserialize;

/// Glyph rendering modes for collector icons.
///
/// | Config value | Meaning                                      |
/// |--------------|----------------------------------------------|
/// | `text`       | Plain text markers, no special font needed   |
/// | `icons`      | Nerdfont glyphs                              |
/// | `minimal`    | Alternative smaller nerdfont set             |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    Text,
    #[default]
    Icons,
    Minimal,
}

impl IconMode {
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "minimal" => Self::Minimal,
            _ => Self::Icons,
        }
    }
}

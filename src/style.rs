use bitflags::bitflags;
use const_format::formatcp;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::color::Rgb;

const ESC: &str = "\x1b";
const CSI: &str = formatcp!("{ESC}[");

/// Drops colors and attributes back to the terminal defaults.
pub const RESET: &str = formatcp!("{CSI}0m");

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Attr: u8 {
        const BOLD = 0x01;
        const ITALIC = 0x02;
    }
}

impl Display for Attr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.contains(Self::BOLD) {
            write!(f, "{CSI}1m")?;
        }
        if self.contains(Self::ITALIC) {
            write!(f, "{CSI}3m")?;
        }
        Ok(())
    }
}

/// A concrete color, or the terminal's own default (the "transparent" value).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Default,
    Rgb(Rgb),
}

impl Paint {
    #[must_use]
    pub fn is_default(self) -> bool {
        matches!(self, Paint::Default)
    }

    pub fn fg(self) -> Fg {
        Fg(self)
    }

    pub fn bg(self) -> Bg {
        Bg(self)
    }
}

pub struct Fg(pub Paint);
pub struct Bg(pub Paint);

impl Display for Fg {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Paint::Default => write!(f, "{CSI}39m"),
            Paint::Rgb(Rgb { r, g, b }) => write!(f, "{CSI}38;2;{r};{g};{b}m"),
        }
    }
}

impl Display for Bg {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Paint::Default => write!(f, "{CSI}49m"),
            Paint::Rgb(Rgb { r, g, b }) => write!(f, "{CSI}48;2;{r};{g};{b}m"),
        }
    }
}

/// One styled run: foreground, background, optional attributes, then the
/// literal text. Rows are sequences of these, closed with [RESET].
pub struct Span<'a> {
    pub fg: Paint,
    pub bg: Paint,
    pub attr: Attr,
    pub text: &'a str,
}

impl Display for Span<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}{}", self.fg.fg(), self.bg.bg(), self.attr, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_emits_fg_bg_then_text() {
        let span = Span {
            fg: Paint::Rgb(Rgb { r: 1, g: 2, b: 3 }),
            bg: Paint::Default,
            attr: Attr::empty(),
            text: "hi",
        };
        assert_eq!(span.to_string(), "\x1b[38;2;1;2;3m\x1b[49mhi");
    }

    #[test]
    fn attributes_follow_colors() {
        let span = Span {
            fg: Paint::Default,
            bg: Paint::Default,
            attr: Attr::BOLD | Attr::ITALIC,
            text: "x",
        };
        assert_eq!(span.to_string(), "\x1b[39m\x1b[49m\x1b[1m\x1b[3mx");
    }
}

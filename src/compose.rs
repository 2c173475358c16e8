//! Stitches independently computed segments into one visually continuous row.
//!
//! Between every adjacent pair a directional transition glyph is drawn whose
//! foreground is the departing segment's background and whose background is
//! the arriving segment's background. The first transition departs from the
//! theme's session anchor; the right edge is either a plain transition into
//! the terminal default or a pill cap, by configuration.

use unicode_width::UnicodeWidthStr;

use crate::health::{Health, State};
use crate::style::{Attr, Paint, RESET, Span};
use crate::theme::Theme;

/// Default powerline transition glyph.
pub const TRANSITION: char = '\u{e0b0}';
/// Rounded cap drawn at the right edge in the pill style.
pub const PILL_CAP: char = '\u{e0b4}';

/// One renderable unit of the row: resolved colors, icon, text, and the
/// originating collector's state and health. Built fresh each cycle, never
/// retained.
#[derive(Clone, Debug)]
pub struct Segment {
    pub fg: Paint,
    pub bg: Paint,
    pub icon: String,
    pub text: String,
    pub state: State,
    pub health: Health,
}

/// Row layout configuration.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    /// Insert a synthetic neutral cell between every pair of segments.
    pub spacing: bool,
    /// Treat the row background as the terminal default.
    pub transparent: bool,
    /// Close the row with a rounded cap instead of a plain transition.
    pub pill: bool,
    pub separator: char,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            spacing: false,
            transparent: false,
            pill: false,
            separator: TRANSITION,
        }
    }
}

struct Cell {
    fg: Paint,
    bg: Paint,
    text: String,
}

/// Render the visible segments into one row string. Empty input (or all
/// inactive) renders to an empty string.
pub fn compose(segments: &[Segment], theme: &Theme, layout: Layout) -> String {
    let cells = cells(segments, theme, layout);
    if cells.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for cell in &cells {
        out.push_str(
            &Span {
                fg: cell.fg,
                bg: cell.bg,
                attr: Attr::empty(),
                text: &cell.text,
            }
            .to_string(),
        );
    }
    out.push_str(RESET);
    out
}

/// Printable width of the composed row, in terminal cells.
pub fn visible_width(segments: &[Segment], theme: &Theme, layout: Layout) -> usize {
    cells(segments, theme, layout)
        .iter()
        .map(|cell| cell.text.width())
        .sum()
}

fn cells(segments: &[Segment], theme: &Theme, layout: Layout) -> Vec<Cell> {
    // Inactive segments drop out before transitions are computed, so their
    // neighbors become directly adjacent.
    let visible: Vec<&Segment> = segments.iter().filter(|s| s.state != State::Inactive).collect();
    if visible.is_empty() {
        return Vec::new();
    }

    let spacing_bg = if layout.transparent {
        Paint::Default
    } else {
        Paint::Rgb(theme.spacing())
    };

    let mut cells = Vec::new();
    let mut prev_bg = Paint::Rgb(theme.session());

    for (i, seg) in visible.iter().enumerate() {
        cells.push(transition(prev_bg, seg.bg, theme, layout));
        cells.push(Cell {
            fg: seg.fg,
            bg: seg.bg,
            text: body(seg),
        });
        prev_bg = seg.bg;

        if layout.spacing && i + 1 < visible.len() {
            cells.push(transition(prev_bg, spacing_bg, theme, layout));
            cells.push(Cell {
                fg: spacing_bg,
                bg: spacing_bg,
                text: String::from(" "),
            });
            prev_bg = spacing_bg;
        }
    }

    if layout.pill {
        cells.push(Cell {
            fg: prev_bg,
            bg: Paint::Default,
            text: PILL_CAP.to_string(),
        });
    } else {
        cells.push(transition(prev_bg, Paint::Default, theme, layout));
    }
    cells
}

fn transition(from: Paint, to: Paint, theme: &Theme, layout: Layout) -> Cell {
    // A transparent foreground on a transparent background is invisible;
    // in transparent+spacing mode the glyph gets the concrete theme
    // background instead.
    let fg = if layout.transparent && layout.spacing && from.is_default() {
        Paint::Rgb(theme.background())
    } else {
        from
    };
    Cell {
        fg,
        bg: to,
        text: layout.separator.to_string(),
    }
}

fn body(seg: &Segment) -> String {
    match (seg.icon.is_empty(), seg.text.is_empty()) {
        (true, true) => String::from(" "),
        (true, false) => format!(" {} ", seg.text),
        (false, true) => format!(" {} ", seg.icon),
        (false, false) => format!(" {} {} ", seg.icon, seg.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn seg(text: &str, state: State) -> Segment {
        Segment {
            fg: Paint::Rgb(Rgb { r: 250, g: 250, b: 250 }),
            bg: Paint::Rgb(Rgb { r: 10, g: 20, b: 30 }),
            icon: String::new(),
            text: text.to_owned(),
            state,
            health: Health::Ok,
        }
    }

    fn count(haystack: &str, needle: char) -> usize {
        haystack.chars().filter(|&c| c == needle).count()
    }

    #[test]
    fn inactive_segments_leave_no_artifact() {
        let theme = Theme::default();
        let segments = [
            seg("aaa", State::Inactive),
            seg("bbb", State::Active),
            seg("ccc", State::Active),
        ];
        let row = compose(&segments, &theme, Layout::default());
        assert!(!row.contains("aaa"));
        assert!(row.contains("bbb") && row.contains("ccc"));
        // session→b, b→c, c→edge: one single transition between survivors.
        assert_eq!(count(&row, TRANSITION), 3);
    }

    #[test]
    fn all_inactive_renders_nothing() {
        let theme = Theme::default();
        let segments = [seg("aaa", State::Inactive)];
        assert_eq!(compose(&segments, &theme, Layout::default()), "");
    }

    #[test]
    fn first_transition_departs_from_session_anchor() {
        let theme = Theme::default();
        let row = compose(&[seg("x", State::Active)], &theme, Layout::default());
        let session = theme.session();
        let anchor = format!("\x1b[38;2;{};{};{}m", session.r, session.g, session.b);
        assert!(row.starts_with(&anchor), "row should open from the session color: {row:?}");
    }

    #[test]
    fn spacing_inserts_one_cell_per_pair() {
        let theme = Theme::default();
        let layout = Layout { spacing: true, ..Layout::default() };
        let segments = [
            seg("a", State::Active),
            seg("b", State::Active),
            seg("c", State::Active),
        ];
        let row = compose(&segments, &theme, layout);
        // Two pairs: each adds one spacing cell and one extra transition
        // on top of the plain four (session edge, two joins, right edge).
        assert_eq!(count(&row, TRANSITION), 4 + 2);

        let spacing = theme.spacing();
        let cell = format!("\x1b[48;2;{};{};{}m ", spacing.r, spacing.g, spacing.b);
        assert_eq!(row.matches(&cell).count(), 2);
    }

    #[test]
    fn transparent_spacing_replaces_invisible_foreground() {
        let theme = Theme::default();
        let layout = Layout { spacing: true, transparent: true, ..Layout::default() };
        let segments = [seg("a", State::Active), seg("b", State::Active)];
        let row = compose(&segments, &theme, layout);

        let background = theme.background();
        let override_fg = format!("\x1b[38;2;{};{};{}m", background.r, background.g, background.b);
        assert!(row.contains(&override_fg), "spacing exit should use the concrete background");
        // No transition may carry the default foreground.
        assert!(!row.contains(&format!("\x1b[39m\x1b[49m{TRANSITION}")));
        assert!(!row.contains(&format!("\x1b[39m\x1b[48;2;10;20;30m{TRANSITION}")));
    }

    #[test]
    fn pill_style_caps_the_right_edge() {
        let theme = Theme::default();
        let plain = compose(&[seg("x", State::Active)], &theme, Layout::default());
        let pill = compose(
            &[seg("x", State::Active)],
            &theme,
            Layout { pill: true, ..Layout::default() },
        );
        assert!(plain.ends_with(&format!("{TRANSITION}{RESET}")));
        assert!(pill.ends_with(&format!("{PILL_CAP}{RESET}")));
        assert_eq!(count(&pill, TRANSITION), 1);
    }

    #[test]
    fn width_counts_cells_not_escapes() {
        let theme = Theme::default();
        let segments = [seg("ab", State::Active), seg("cd", State::Active)];
        // two bodies of " ab " and " cd " plus three transitions
        assert_eq!(visible_width(&segments, &theme, Layout::default()), 4 + 4 + 3);
        assert_eq!(visible_width(&[], &theme, Layout::default()), 0);
    }
}

//! Powerline-style status line engine for terminal panes.
//!
//! Independent collectors report one fact each (state, health, icon, text);
//! a file-backed cache with read-time TTLs keeps frequent refresh ticks
//! cheap; the composer stitches the surviving segments into one colored row
//! with directional transitions.
//!
//! # Example
//!
//! ```
//! use paneline::{Health, Layout, Paint, Segment, State, Theme, compose};
//!
//! let theme = Theme::default();
//! let segments = [Segment {
//!     fg: Paint::Rgb(theme.health_fg(Health::Ok)),
//!     bg: Paint::Rgb(theme.health_bg(Health::Ok)),
//!     icon: String::new(),
//!     text: String::from("42%"),
//!     state: State::Active,
//!     health: Health::Ok,
//! }];
//! println!("{}", compose(&segments, &theme, Layout::default()));
//! ```

mod assemble;
mod cache;
mod collect;
mod color;
mod compose;
mod config;
mod health;
mod icon;
mod style;
mod theme;

/// Built-in collectors
pub mod collector;

pub use crate::{
    assemble::Assembler,
    cache::{Cache, CacheConfig},
    collect::{Collector, CollectorKind, CollectorResult, Presence},
    color::{ColorError, Rgb, VariantKind, VariantTable, darker, lighter},
    compose::{Layout, PILL_CAP, Segment, TRANSITION, compose, visible_width},
    config::Config,
    health::{Health, State, is_valid_health, is_valid_state, worse},
    icon::IconMode,
    style::{Attr, Paint, RESET, Span},
    theme::{Palette, Theme},
};

//! The contract every collector produces and the registry that names them.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::collector;
use crate::health::{Health, State};
use crate::icon::IconMode;

/// One collector's report for a refresh cycle.
///
/// `state` governs visibility, `health` governs coloring, and the two never
/// cross. `context` is collector-defined and may steer icon or text choice,
/// never color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorResult {
    pub state: State,
    pub health: Health,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub text: String,
}

impl CollectorResult {
    /// An omitted segment: inactive, least-severe, empty.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(icon: impl Into<String>, text: impl Into<String>) -> Self {
        CollectorResult {
            state: State::Active,
            health: Health::Ok,
            context: String::new(),
            icon: icon.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// Whether a collector is rendered even when its state is inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presence {
    Always,
    #[default]
    Conditional,
}

/// An independent data source reporting one fact about the environment.
///
/// Contract: the icon may vary by context and state, never by health —
/// severity is expressed through color alone. Collectors honor their own
/// timeouts when computing; the engine only decides freshness.
pub trait Collector {
    /// Stable identifier; doubles as the cache key.
    fn name(&self) -> &'static str;

    /// Maximum age at which a cached result is still served.
    fn ttl(&self) -> Duration;

    fn presence(&self) -> Presence {
        Presence::Conditional
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult>;
}

/// The built-in collector set, resolvable by name.
///
/// The identifier-to-implementation table is built here at startup; past this
/// point dispatch is through the trait object, not strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectorKind {
    Hostname,
    Workdir,
    Clock,
    Load,
    Battery,
}

impl CollectorKind {
    pub const ALL: [CollectorKind; 5] = [
        CollectorKind::Hostname,
        CollectorKind::Workdir,
        CollectorKind::Clock,
        CollectorKind::Load,
        CollectorKind::Battery,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hostname" => Some(Self::Hostname),
            "workdir" => Some(Self::Workdir),
            "clock" | "time" => Some(Self::Clock),
            "load" => Some(Self::Load),
            "battery" => Some(Self::Battery),
            _ => None,
        }
    }

    pub fn create(self) -> Box<dyn Collector> {
        match self {
            Self::Hostname => Box::new(collector::Hostname),
            Self::Workdir => Box::new(collector::Workdir),
            Self::Clock => Box::new(collector::Clock),
            Self::Load => Box::new(collector::Load),
            Self::Battery => Box::new(collector::Battery),
        }
    }
}

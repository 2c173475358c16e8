//! Severity and visibility registry: fixed orderings, no state.

use serde::{Deserialize, Serialize};

/// Operational state of a collector. Governs visibility only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum State {
    #[default]
    Inactive,
    Active,
    Degraded,
    Failed,
}

impl State {
    /// Unknown names degrade to [State::Inactive] instead of failing the
    /// render.
    pub fn from_name(name: &str) -> Self {
        match name {
            "active" => Self::Active,
            "degraded" => Self::Degraded,
            "failed" => Self::Failed,
            _ => Self::Inactive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.name().to_owned()
    }
}

/// Severity signal of a collector. Governs coloring only, never visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Health {
    Info,
    #[default]
    Ok,
    Good,
    Warning,
    Error,
}

impl Health {
    /// Strictly increasing severity rank.
    #[must_use]
    pub fn rank(self) -> i8 {
        match self {
            Self::Info => -1,
            Self::Ok => 0,
            Self::Good => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    /// Unknown names degrade to [Health::Ok] instead of failing the render.
    pub fn from_name(name: &str) -> Self {
        match name {
            "info" => Self::Info,
            "good" => Self::Good,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Ok,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Ok => "ok",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Palette key of the base color for this severity.
    pub fn base_key(self) -> &'static str {
        match self {
            Self::Info => "info-base",
            Self::Ok => "ok-base",
            Self::Good => "good-base",
            Self::Warning => "warning-base",
            Self::Error => "error-base",
        }
    }
}

impl From<String> for Health {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Health> for String {
    fn from(health: Health) -> Self {
        health.name().to_owned()
    }
}

/// The input with the higher rank; on equal rank, `b` (stable merge).
#[must_use]
pub fn worse(a: Health, b: Health) -> Health {
    if a.rank() > b.rank() { a } else { b }
}

pub fn is_valid_state(name: &str) -> bool {
    matches!(name, "inactive" | "active" | "degraded" | "failed")
}

pub fn is_valid_health(name: &str) -> bool {
    matches!(name, "info" | "ok" | "good" | "warning" | "error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_increase_with_severity() {
        let ordered = [Health::Info, Health::Ok, Health::Good, Health::Warning, Health::Error];
        for pair in ordered.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(Health::Info.rank(), -1);
        assert_eq!(Health::Error.rank(), 3);
    }

    #[test]
    fn worse_picks_higher_rank() {
        assert_eq!(worse(Health::Warning, Health::Error), Health::Error);
        assert_eq!(worse(Health::Error, Health::Warning), Health::Error);
        assert_eq!(worse(Health::Ok, Health::Ok), Health::Ok);
        assert_eq!(worse(Health::Info, Health::Ok), Health::Ok);
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        assert_eq!(Health::from_name("catastrophic"), Health::Ok);
        assert_eq!(State::from_name("sleeping"), State::Inactive);
        assert_eq!(worse(Health::from_name("catastrophic"), Health::Ok), Health::Ok);
    }

    #[test]
    fn validity_checks_match_known_names() {
        assert!(is_valid_state("degraded"));
        assert!(!is_valid_state("Degraded"));
        assert!(is_valid_health("info"));
        assert!(!is_valid_health("fine"));
    }

    #[test]
    fn serde_round_trips_lenient() {
        let json = serde_json::to_string(&Health::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let back: Health = serde_json::from_str("\"no-such-level\"").unwrap();
        assert_eq!(back, Health::Ok);
        let state: State = serde_json::from_str("\"no-such-state\"").unwrap();
        assert_eq!(state, State::Inactive);
    }
}

//! Top-level driver: collectors → cache → segments → composed rows.

use tracing::{debug, warn};

use crate::cache::Cache;
use crate::collect::{Collector, CollectorKind, CollectorResult, Presence};
use crate::compose::{self, Layout, Segment};
use crate::health::State;
use crate::icon::IconMode;
use crate::style::Paint;
use crate::theme::Theme;

/// Owns one refresh cycle. Invoked synchronously per external tick; holds no
/// scheduler of its own. A failing collector is invisible for the cycle,
/// never rendered as error text.
pub struct Assembler {
    rows: Vec<Vec<Box<dyn Collector>>>,
    cache: Cache,
    theme: Theme,
    layout: Layout,
    mode: IconMode,
}

impl Assembler {
    pub fn new(
        rows: Vec<Vec<Box<dyn Collector>>>,
        cache: Cache,
        theme: Theme,
        layout: Layout,
        mode: IconMode,
    ) -> Self {
        Assembler { rows, cache, theme, layout, mode }
    }

    /// Resolve configured collector names against the built-in registry.
    /// Unknown names are reported and skipped.
    pub fn from_names<S: AsRef<str>>(
        rows: &[Vec<S>],
        cache: Cache,
        theme: Theme,
        layout: Layout,
        mode: IconMode,
    ) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|name| {
                        let name = name.as_ref();
                        match CollectorKind::from_name(name) {
                            Some(kind) => Some(kind.create()),
                            None => {
                                warn!(collector = name, "unknown collector, skipping");
                                None
                            }
                        }
                    })
                    .collect()
            })
            .collect();
        Assembler::new(rows, cache, theme, layout, mode)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Build the visible segments of every configured row.
    pub fn assemble(&self) -> Vec<Vec<Segment>> {
        self.rows
            .iter()
            .map(|row| row.iter().filter_map(|c| self.segment_for(c.as_ref())).collect())
            .collect()
    }

    /// Render every configured row to its final string.
    pub fn render(&self) -> Vec<String> {
        self.assemble()
            .iter()
            .map(|segments| compose::compose(segments, &self.theme, self.layout))
            .collect()
    }

    fn segment_for(&self, collector: &dyn Collector) -> Option<Segment> {
        let result = self.result_for(collector);
        let always = collector.presence() == Presence::Always;
        if result.state == State::Inactive && !always {
            return None;
        }
        // An always-present collector renders its report even when the
        // state says inactive.
        let state = if result.state == State::Inactive { State::Active } else { result.state };

        Some(Segment {
            fg: Paint::Rgb(self.theme.health_fg(result.health)),
            bg: Paint::Rgb(self.theme.health_bg(result.health)),
            icon: result.icon,
            text: result.text,
            state,
            health: result.health,
        })
    }

    /// One collector's result for this cycle, through the cache under the
    /// collector's own TTL. Every failure path collapses to inactive.
    fn result_for(&self, collector: &dyn Collector) -> CollectorResult {
        let key = collector.name();
        let ttl = collector.ttl();

        if ttl.is_zero() {
            // Never fresh in the cache; skip the disk round-trip.
            return collector.collect(self.mode).unwrap_or_else(|err| {
                debug!(collector = key, error = %err, "collection failed, hiding segment");
                CollectorResult::inactive()
            });
        }

        let outcome = self.cache.get_or_compute(key, ttl, || {
            let result = collector.collect(self.mode)?;
            Ok(serde_json::to_string(&result)?)
        });
        match outcome {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(result) => result,
                Err(err) => {
                    debug!(collector = key, error = %err, "corrupt cache entry, dropping");
                    let _ = self.cache.invalidate(key);
                    CollectorResult::inactive()
                }
            },
            Err(err) => {
                debug!(collector = key, error = %err, "collection failed, hiding segment");
                CollectorResult::inactive()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::health::Health;
    use anyhow::anyhow;
    use std::cell::Cell as StdCell;
    use std::time::Duration;
    use tempfile::{TempDir, tempdir};

    struct Fake {
        name: &'static str,
        result: Result<CollectorResult, &'static str>,
        presence: Presence,
        ttl: Duration,
        calls: StdCell<u32>,
    }

    impl Fake {
        fn new(name: &'static str, result: CollectorResult) -> Self {
            Fake {
                name,
                result: Ok(result),
                presence: Presence::Conditional,
                ttl: Duration::from_secs(60),
                calls: StdCell::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Fake {
                name,
                result: Err("probe exploded"),
                presence: Presence::Conditional,
                ttl: Duration::from_secs(60),
                calls: StdCell::new(0),
            }
        }
    }

    impl Collector for Fake {
        fn name(&self) -> &'static str {
            self.name
        }

        fn ttl(&self) -> Duration {
            self.ttl
        }

        fn presence(&self) -> Presence {
            self.presence
        }

        fn collect(&self, _: IconMode) -> anyhow::Result<CollectorResult> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone().map_err(|msg| anyhow!(msg))
        }
    }

    fn assembler_in(dir: &TempDir, row: Vec<Box<dyn Collector>>) -> Assembler {
        let cache = Cache::new(CacheConfig {
            dir: dir.path().to_path_buf(),
            default_ttl: Duration::from_secs(60),
        });
        Assembler::new(vec![row], cache, Theme::default(), Layout::default(), IconMode::Text)
    }

    #[test]
    fn renders_visible_collectors_in_order() {
        let dir = tempdir().unwrap();
        let assembler = assembler_in(
            &dir,
            vec![
                Box::new(Fake::new("cpu", CollectorResult::active("", "cpu-fact"))),
                Box::new(Fake::new("battery", CollectorResult::inactive())),
                Box::new(Fake::new(
                    "git",
                    CollectorResult::active("", "git-fact").with_health(Health::Warning),
                )),
            ],
        );

        let rows = assembler.render();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert!(!row.contains("battery"));
        let cpu = row.find("cpu-fact").expect("cpu segment rendered");
        let git = row.find("git-fact").expect("git segment rendered");
        assert!(cpu < git);

        // git's background comes from warning-base.
        let warning = Theme::default().health_bg(Health::Warning);
        assert!(row.contains(&format!("48;2;{};{};{}m", warning.r, warning.g, warning.b)));
    }

    #[test]
    fn failed_collector_is_invisible() {
        let dir = tempdir().unwrap();
        let assembler = assembler_in(
            &dir,
            vec![
                Box::new(Fake::failing("net")),
                Box::new(Fake::new("cpu", CollectorResult::active("", "cpu-fact"))),
            ],
        );
        let row = &assembler.render()[0];
        assert!(row.contains("cpu-fact"));
        assert!(!row.contains("probe exploded"));
        // Failure caches nothing.
        assert!(!dir.path().join("net").exists());
    }

    #[test]
    fn always_present_collector_survives_inactive_state() {
        let dir = tempdir().unwrap();
        let mut vpn = Fake::new(
            "vpn",
            CollectorResult {
                text: String::from("off"),
                ..CollectorResult::inactive()
            },
        );
        vpn.presence = Presence::Always;
        let assembler = assembler_in(&dir, vec![Box::new(vpn)]);
        assert!(assembler.render()[0].contains("off"));
    }

    #[test]
    fn second_cycle_is_served_from_cache() {
        let dir = tempdir().unwrap();
        let fake = Box::new(Fake::new("cpu", CollectorResult::active("", "cpu-fact")));
        let cache = Cache::new(CacheConfig {
            dir: dir.path().to_path_buf(),
            default_ttl: Duration::from_secs(60),
        });
        let assembler = Assembler::new(
            vec![vec![fake]],
            cache,
            Theme::default(),
            Layout::default(),
            IconMode::Text,
        );

        let first = assembler.render();
        let second = assembler.render();
        assert_eq!(first, second);

        // The record is on disk as plain JSON, readable next cycle.
        let raw = std::fs::read_to_string(dir.path().join("cpu")).unwrap();
        let stored: CollectorResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.text, "cpu-fact");
    }

    #[test]
    fn zero_ttl_collector_bypasses_the_cache() {
        let dir = tempdir().unwrap();
        let mut clock = Fake::new("clock", CollectorResult::active("", "12:00"));
        clock.ttl = Duration::ZERO;
        let assembler = assembler_in(&dir, vec![Box::new(clock)]);
        assembler.render();
        assert!(!dir.path().join("clock").exists());
    }

    #[test]
    fn corrupt_cache_entry_is_dropped_and_hidden() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(CacheConfig {
            dir: dir.path().to_path_buf(),
            default_ttl: Duration::from_secs(60),
        });
        cache.set("cpu", "not json at all").unwrap();

        let assembler = assembler_in(
            &dir,
            vec![Box::new(Fake::new("cpu", CollectorResult::active("", "cpu-fact")))],
        );
        let row = &assembler.render()[0];
        assert!(!row.contains("cpu-fact"));
        // Entry was invalidated; the next cycle recomputes.
        assert!(!dir.path().join("cpu").exists());
        assert!(assembler.render()[0].contains("cpu-fact"));
    }

    #[test]
    fn unknown_names_are_skipped() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(CacheConfig {
            dir: dir.path().to_path_buf(),
            default_ttl: Duration::from_secs(60),
        });
        let assembler = Assembler::from_names(
            &[vec!["clock", "no-such-collector"]],
            cache,
            Theme::default(),
            Layout::default(),
            IconMode::Text,
        );
        // Only the clock survives name resolution.
        assert_eq!(assembler.rows[0].len(), 1);
    }
}

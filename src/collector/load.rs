use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::collect::{Collector, CollectorResult};
use crate::health::Health;
use crate::icon::IconMode;

/// One-minute load average from `/proc/loadavg`, scored against the core
/// count.
pub struct Load;

impl Collector for Load {
    fn name(&self) -> &'static str {
        "load"
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(5)
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult> {
        let raw = fs::read_to_string("/proc/loadavg").context("reading /proc/loadavg")?;
        let load: f64 = raw
            .split_whitespace()
            .next()
            .context("empty /proc/loadavg")?
            .parse()
            .context("parsing load average")?;

        let cores = thread::available_parallelism().map(usize::from).unwrap_or(1) as f64;
        let health = match load / cores {
            ratio if ratio >= 1.5 => Health::Error,
            ratio if ratio >= 0.7 => Health::Warning,
            _ => Health::Ok,
        };
        let icon = match mode {
            IconMode::Text => "ld",
            IconMode::Icons | IconMode::Minimal => "󰓅",
        };
        Ok(CollectorResult::active(icon, format!("{load:.2}")).with_health(health))
    }
}

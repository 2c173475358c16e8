use std::time::Duration;

use anyhow::Result;
use chrono::prelude::*;

use crate::collect::{Collector, CollectorResult, Presence};
use crate::health::Health;
use crate::icon::IconMode;

/// Wall clock. Zero TTL: a cached minute is a wrong minute.
pub struct Clock;

impl Collector for Clock {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }

    fn presence(&self) -> Presence {
        Presence::Always
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult> {
        let now = Local::now().format("%H:%M").to_string();
        let icon = match mode {
            IconMode::Text => "",
            IconMode::Icons | IconMode::Minimal => "󰥔",
        };
        Ok(CollectorResult::active(icon, now).with_health(Health::Info))
    }
}

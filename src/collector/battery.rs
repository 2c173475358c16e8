use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::collect::{Collector, CollectorResult};
use crate::health::Health;
use crate::icon::IconMode;

const POWER_SUPPLY: &str = "/sys/class/power_supply";

/// Battery charge from sysfs. Inactive on machines without one.
pub struct Battery;

impl Collector for Battery {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(30)
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult> {
        let Some(supply) = find_battery() else {
            return Ok(CollectorResult::inactive());
        };

        let capacity: u8 = fs::read_to_string(supply.join("capacity"))?.trim().parse()?;
        let status = fs::read_to_string(supply.join("status")).unwrap_or_default();
        let charging = matches!(status.trim(), "Charging" | "Full");

        let health = match capacity {
            60.. => Health::Good,
            30.. => Health::Ok,
            15.. => Health::Warning,
            _ => Health::Error,
        };
        let icon = match (mode, charging) {
            (IconMode::Text, true) => "chg",
            (IconMode::Text, false) => "bat",
            (_, true) => "󰂄",
            (_, false) => "󰁿",
        };
        let context = if charging { "charging" } else { "discharging" };
        Ok(CollectorResult::active(icon, format!("{capacity}%"))
            .with_health(health)
            .with_context(context))
    }
}

fn find_battery() -> Option<PathBuf> {
    for entry in fs::read_dir(POWER_SUPPLY).ok()?.flatten() {
        let path = entry.path();
        if let Ok(kind) = fs::read_to_string(path.join("type"))
            && kind.trim() == "Battery"
        {
            return Some(path);
        }
    }
    None
}

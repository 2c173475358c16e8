use std::env;
use std::fs;
use std::time::Duration;

use anyhow::Result;

use crate::collect::{Collector, CollectorResult, Presence};
use crate::icon::IconMode;

/// `user@host` with a chassis-type icon. Always present.
pub struct Hostname;

impl Collector for Hostname {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(3600)
    }

    fn presence(&self) -> Presence {
        Presence::Always
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult> {
        let host = rustix::system::uname().nodename().to_string_lossy().into_owned();
        let user = env::var("USER").unwrap_or_else(|_| String::from("<user>"));
        let chassis = chassis_name();
        Ok(CollectorResult::active(chassis_icon(chassis, mode), format!("{user}@{host}"))
            .with_context(chassis))
    }
}

/// Chassis detection, the short version of what `hostnamed` does: the
/// machine-info override first, then the DMI chassis type.
fn chassis_name() -> &'static str {
    if let Ok(info) = fs::read_to_string("/etc/machine-info") {
        for line in info.lines() {
            if let Some(value) = line.strip_prefix("CHASSIS=") {
                return match value.trim_matches('"') {
                    "laptop" | "convertible" => "laptop",
                    "desktop" => "desktop",
                    "server" => "server",
                    "vm" => "vm",
                    "container" => "container",
                    _ => "unknown",
                };
            }
        }
    }
    match fs::read_to_string("/sys/class/dmi/id/chassis_type")
        .ok()
        .and_then(|s| s.trim().parse::<u8>().ok())
    {
        Some(3 | 4 | 6 | 7 | 13) => "desktop",
        Some(8..=11 | 14 | 31) => "laptop",
        Some(17 | 23 | 28 | 29) => "server",
        _ => "unknown",
    }
}

fn chassis_icon(chassis: &str, mode: IconMode) -> &'static str {
    match mode {
        IconMode::Text => "",
        IconMode::Icons | IconMode::Minimal => match chassis {
            "laptop" => "󰌢",
            "desktop" => "󰇄",
            "server" => "󰒋",
            "vm" => "󰪫",
            "container" => "󰆧",
            _ => "󰟀",
        },
    }
}

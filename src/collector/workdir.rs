use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use rustix::fs::Access;

use crate::collect::{Collector, CollectorResult, Presence};
use crate::health::Health;
use crate::icon::IconMode;

/// Current working directory, home-abbreviated, with read-only detection.
pub struct Workdir;

impl Collector for Workdir {
    fn name(&self) -> &'static str {
        "workdir"
    }

    fn ttl(&self) -> Duration {
        // The cwd changes under the user's feet; only dedupe rapid re-renders.
        Duration::from_secs(2)
    }

    fn presence(&self) -> Presence {
        Presence::Always
    }

    fn collect(&self, mode: IconMode) -> Result<CollectorResult> {
        let cwd = env::current_dir()?;
        let read_only = rustix::fs::access(&cwd, Access::WRITE_OK).is_err();

        let text = abbreviate(&cwd);
        let (context, health) = if read_only {
            ("read-only", Health::Warning)
        } else {
            ("", Health::Ok)
        };
        let icon = match (mode, read_only) {
            (IconMode::Text, true) => "R/O",
            (IconMode::Text, false) => "",
            (_, true) => "󰌾",
            (_, false) => "󰉋",
        };
        Ok(CollectorResult::active(icon, text).with_health(health).with_context(context))
    }
}

fn abbreviate(cwd: &Path) -> String {
    if let Ok(home) = env::var("HOME") {
        let home = Path::new(&home);
        if let Ok(rest) = cwd.strip_prefix(home) {
            return if rest.as_os_str().is_empty() {
                String::from("~")
            } else {
                format!("~/{}", rest.display())
            };
        }
    }
    cwd.display().to_string()
}

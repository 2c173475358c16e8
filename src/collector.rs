//! Built-in collectors: one module per fact, cheap OS queries only.

mod battery;
mod clock;
mod hostname;
mod load;
mod workdir;

pub use {
    battery::Battery, clock::Clock, hostname::Hostname, load::Load, workdir::Workdir,
};

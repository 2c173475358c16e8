use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use argh::FromArgs;
use paneline::{
    Assembler, Cache, Config, IconMode, Palette, Theme, VariantKind, compose, visible_width,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// powerline-style status line engine for terminal panes
struct Arguments {
    #[argh(subcommand)]
    /// action
    command: Option<Command>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Run(Run),
    Variants(Variants),
    Invalidate(Invalidate),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// render the configured status line once
struct Run {
    #[argh(option)]
    /// config file (default: $XDG_CONFIG_HOME/paneline/config.toml)
    config: Option<String>,

    #[argh(option)]
    /// palette file overriding the configured theme
    theme: Option<String>,

    #[argh(option)]
    /// icon mode. `text` and `minimal` have special meaning
    mode: Option<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "variants")]
/// print the shades derived from a palette
struct Variants {
    #[argh(option)]
    /// palette file; the built-in palette when omitted
    theme: Option<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "invalidate")]
/// drop a cache entry before its TTL elapses
struct Invalidate {
    #[argh(positional)]
    /// cache key to drop
    key: String,

    #[argh(option)]
    /// config file (default: $XDG_CONFIG_HOME/paneline/config.toml)
    config: Option<String>,
}

fn config_path(explicit: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_default()
        .join("paneline")
        .join("config.toml")
}

fn load_theme(config: &Config) -> Result<Theme> {
    let palette = match &config.theme {
        Some(path) => Palette::load_from(path)?,
        None => Palette::default(),
    };
    Ok(Theme::new(&palette))
}

fn run(args: Run) -> Result<()> {
    let mut config = Config::load_from(&config_path(args.config))?;
    if let Some(theme) = args.theme {
        config.theme = Some(PathBuf::from(theme));
    }
    if let Some(mode) = args.mode.as_deref() {
        config.mode = IconMode::from_name(mode);
    }

    let theme = load_theme(&config)?;
    let cache = Cache::new(config.cache_config());
    let assembler = Assembler::from_names(&config.rows, cache, theme, config.layout(), config.mode);

    let term_width = terminal_size::terminal_size()
        .map(|(w, _h)| usize::from(w.0))
        .unwrap_or(80);
    for segments in assembler.assemble() {
        let width = visible_width(&segments, assembler.theme(), assembler.layout());
        if width > term_width {
            debug!(width, term_width, "row wider than terminal");
        }
        println!("{}", compose(&segments, assembler.theme(), assembler.layout()));
    }
    Ok(())
}

fn variants(args: Variants) -> Result<()> {
    let palette = match args.theme {
        Some(path) => Palette::load_from(&PathBuf::from(path))?,
        None => Palette::default(),
    };
    let theme = Theme::new(&palette);
    for base in theme.variants().bases() {
        for kind in VariantKind::ALL {
            if let Some(shade) = theme.variants().get(base, kind) {
                println!("{base}.{}: {shade}", kind.name());
            }
        }
    }
    Ok(())
}

fn invalidate(args: Invalidate) -> Result<()> {
    let config = Config::load_from(&config_path(args.config))?;
    let cache = Cache::new(config.cache_config());
    cache.invalidate(&args.key)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Arguments = argh::from_env();
    let Some(command) = args.command else {
        let ver = env!("CARGO_PKG_VERSION");
        println!("[paneline {ver}] --- status line engine for terminal panes");
        println!("Use `--help` to see advanced usage");
        println!("Render once:");
        println!("    paneline run");
        return;
    };

    let result = match command {
        Command::Run(args) => run(args),
        Command::Variants(args) => variants(args),
        Command::Invalidate(args) => invalidate(args),
    };
    if let Err(err) = result {
        eprintln!("paneline: {err:#}");
        process::exit(1);
    }
}

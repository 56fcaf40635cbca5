mod app;
mod cli;
mod logging;
mod page;
mod scroll;

use binrain_config::{Config, IntroSeenFlag};
use binrain_intro::Drawing;
use clap::Parser;

use crate::app::App;
use crate::cli::Args;
use crate::page::PortfolioContent;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_path = logging::init();
    tracing::info!("{}", logging::describe(log_path.as_deref()));

    let config = match args.config.clone().or_else(binrain_config::config_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let content = match &config.page.content {
        Some(path) => PortfolioContent::load(path)?,
        None => PortfolioContent::builtin()?,
    };
    let drawing = load_drawing(&config);

    let seen_flag = IntroSeenFlag::for_current_session();
    let intro_seen = resolve_intro_seen(seen_flag.as_ref(), &args);
    tracing::info!(intro_seen, seed = ?args.seed, "starting");

    let app = App::new(config, content, drawing, seen_flag, intro_seen, args.seed);
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// Whether to skip the intro. `--replay-intro` resets the session flag; a
/// flag that can't be removed is only logged.
fn resolve_intro_seen(flag: Option<&IntroSeenFlag>, args: &Args) -> bool {
    if args.skip_intro {
        return true;
    }
    let Some(flag) = flag else {
        return false;
    };
    if args.replay_intro {
        if let Err(err) = flag.clear() {
            tracing::warn!(%err, "could not reset the intro flag");
        }
        return false;
    }
    flag.is_set()
}

/// The configured drawing, or the built-in one. A drawing that can't be
/// loaded becomes empty, which skips the intro.
fn load_drawing(config: &Config) -> Drawing {
    let loaded = match &config.intro.drawing {
        Some(path) => Drawing::load(path),
        None => Drawing::builtin(),
    };
    match loaded {
        Ok(drawing) => drawing,
        Err(err) => {
            tracing::warn!(%err, "intro drawing unavailable, skipping intro");
            Drawing::default()
        }
    }
}

use std::io;

use anyhow::{Context, Result};
use tias::{
    catalog::Catalog,
    cli::Cli,
    config::Config,
    exec::PistonClient,
    interrupt::{listen_for_ctrl_c, Interrupt},
    logging,
    printer::{color_wanted, TextPrinter},
    session::{Session, Settings, StdinLines},
    store::OverrideFile,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load config; CLI flags override it
    let mut cfg = Config::load()?;
    if let Some(url) = &args.api_url {
        cfg.set("API_BASE_URL", url.clone());
    }
    if let Some(secs) = args.timeout {
        cfg.set("REQUEST_TIMEOUT", secs.to_string());
    }
    if args.no_confirm {
        cfg.set("CONFIRM_JARGON", "false");
    }

    let color = color_wanted(args.no_color, cfg.get_bool("DEFAULT_COLOR"));
    logging::init_logging(args.verbose, color)?;
    tracing::debug!(config = %cfg.config_path.display(), "configuration loaded");

    let settings = Settings {
        timeout: cfg.request_timeout()?,
        confirm_jargon: cfg.get_bool("CONFIRM_JARGON"),
    };
    let client = PistonClient::from_config(&cfg)?;
    tracing::debug!(api = client.base_url(), "using execution service");

    let overrides = OverrideFile::new(cfg.overrides_path());
    tracing::debug!(path = %overrides.path().display(), "loading overrides");
    let saved = overrides
        .load()
        .with_context(|| "fix or remove the override file to continue")?;

    let interrupt = Interrupt::new();
    listen_for_ctrl_c(interrupt.clone());

    let mut session = Session::new(Catalog::bundled(), client, StdinLines, io::stdout())
        .with_settings(settings)
        .with_printer(TextPrinter::new(color))
        .with_interrupt(interrupt)
        .with_overrides(overrides, saved);
    session.run().await
}

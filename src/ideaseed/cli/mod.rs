//! # CLI Layer
//!
//! This module is **one possible UI client** for ideaseed, it is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, interactive prompts)
//! - Uses `std::process::exit` (through `main.rs`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become a [`setup::Cli`] via clap,
//!    then a [`RawFlags`](ideaseed::options::RawFlags) source for the API
//! 2. **Context Setup**: logging, paths, settings and the live connector
//! 3. **API Dispatch**: call the matching `IdeaseedApi` method
//! 4. **Output Formatting**: `CmdResult` messages, URLs and settings
//!
//! Business rules (positional roles, flag layering, validation, placement)
//! live below the API and are tested there.

pub mod print;
pub mod setup;
pub mod terminal;

use clap::Parser;
use ideaseed::api::{ConfigAction, IdeaseedApi, MessageLevel};
use ideaseed::config::{self, Settings};
use ideaseed::connect::LiveConnector;
use ideaseed::error::{IdeaseedError, Result};
use print::{print_messages, print_settings, print_url};
use setup::{Cli, Commands};
use terminal::{open_browser, TerminalPrompter};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: IdeaseedApi<LiveConnector>,
    prompter: TerminalPrompter,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match &cli.command {
        Some(Commands::Login { service }) => {
            let result = ctx
                .api
                .login((*service).into(), cli.raw_flags(), &mut ctx.prompter)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Logout) => {
            let result = ctx.api.logout(cli.raw_flags())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => {
            handle_config(&ctx, key.clone(), value.clone())
        }
        Some(Commands::About) => {
            print_messages(&ctx.api.about().messages);
            Ok(())
        }
        Some(Commands::Version) => {
            print_messages(&ctx.api.version().messages);
            Ok(())
        }
        Some(Commands::Update) => {
            print_messages(&ctx.api.update().messages);
            Ok(())
        }
        None => handle_create(&mut ctx, &cli),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("IDEASEED_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut paths = config::default_paths()?;
    if let Some(settings) = &cli.config_file {
        paths.settings = settings.clone();
    }
    tracing::debug!(settings = %paths.settings.display(), "using settings file");

    let settings = Settings::load(&paths.settings)?;
    let connector = LiveConnector::new(settings.github_api_url(), settings.notes_endpoint());

    Ok(AppContext {
        api: IdeaseedApi::new(connector, paths),
        prompter: TerminalPrompter::new(),
    })
}

fn handle_create(ctx: &mut AppContext, cli: &Cli) -> Result<()> {
    let options = ctx
        .api
        .resolve_options(&cli.create.tokens, cli.raw_flags())?;
    let result = ctx.api.create(&options, &mut ctx.prompter)?;
    print_messages(&result.messages);

    if let Some(url) = &result.url {
        print_url(url);
        if options.open {
            if let Err(e) = open_browser(url) {
                tracing::warn!(error = %e, "could not open a browser");
            }
        }
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if let Some(error) = result
        .messages
        .iter()
        .find(|m| m.level == MessageLevel::Error)
    {
        return Err(IdeaseedError::usage(error.content.clone()));
    }

    if show_all {
        if let Some(settings) = &result.settings {
            print_settings(settings);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

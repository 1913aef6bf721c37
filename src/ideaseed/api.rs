//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every ideaseed operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Layers flag sources**: command line, then the settings file, then the
//!   built-in defaults
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and never exits the process.
//!
//! ## Generic Over Connector
//!
//! `IdeaseedApi<C: Connector>` is generic over how backends are obtained:
//! - Production: `IdeaseedApi<LiveConnector>`
//! - Testing: `IdeaseedApi<MemoryConnector>`

use crate::commands;
use crate::config::Settings;
use crate::connect::Connector;
use crate::error::Result;
use crate::options::{self, InvocationOptions, RawFlags};
use crate::prompt::Prompter;

pub use crate::commands::auth::Service;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, IdeaseedPaths, MessageLevel};

pub struct IdeaseedApi<C: Connector> {
    connector: C,
    paths: IdeaseedPaths,
}

impl<C: Connector> IdeaseedApi<C> {
    pub fn new(connector: C, paths: IdeaseedPaths) -> Self {
        Self { connector, paths }
    }

    pub fn paths(&self) -> &IdeaseedPaths {
        &self.paths
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// `cli_flags` first, then the settings file, then the built-in defaults.
    fn layered_flags(&self, cli_flags: RawFlags) -> Result<RawFlags> {
        let settings = Settings::load(&self.paths.settings)?;
        let mut flags = cli_flags;
        flags.extend(settings.layered_flags(&self.paths));
        Ok(flags)
    }

    /// Resolves and validates everything before any network access.
    pub fn resolve_options(
        &self,
        positionals: &[String],
        cli_flags: RawFlags,
    ) -> Result<InvocationOptions> {
        options::resolve(positionals, self.layered_flags(cli_flags)?)
    }

    pub fn create(
        &mut self,
        options: &InvocationOptions,
        prompter: &mut dyn Prompter,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.connector, options, prompter)
    }

    pub fn login(
        &mut self,
        service: Service,
        cli_flags: RawFlags,
        prompter: &mut dyn Prompter,
    ) -> Result<CmdResult> {
        let cache = options::resolve_auth_cache(self.layered_flags(cli_flags)?)?;
        commands::auth::login(&mut self.connector, service, cache, prompter)
    }

    pub fn logout(&self, cli_flags: RawFlags) -> Result<CmdResult> {
        let cache = options::resolve_auth_cache(self.layered_flags(cli_flags)?)?;
        commands::auth::logout(cache)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths.settings, action)
    }

    pub fn about(&self) -> CmdResult {
        commands::info::about(&self.paths)
    }

    pub fn version(&self) -> CmdResult {
        commands::info::version()
    }

    pub fn update(&self) -> CmdResult {
        commands::info::update()
    }
}

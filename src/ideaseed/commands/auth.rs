use crate::auth::AuthCache;
use crate::backend::{github, notes};
use crate::commands::{CmdMessage, CmdResult};
use crate::connect::Connector;
use crate::error::Result;
use crate::prompt::Prompter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Github,
    Notes,
}

impl Service {
    pub fn key(self) -> &'static str {
        match self {
            Service::Github => github::SERVICE,
            Service::Notes => notes::SERVICE,
        }
    }
}

/// Logs into `service` now, caching the credentials for later runs.
pub fn login<C: Connector>(
    connector: &mut C,
    service: Service,
    cache_path: Option<PathBuf>,
    prompter: &mut dyn Prompter,
) -> Result<CmdResult> {
    let mut messages = Vec::new();
    let cache = AuthCache::new(cache_path, service.key());
    match service {
        Service::Github => {
            let host = connector.code_host(&cache, prompter, &mut messages)?;
            let username = host.username()?;
            messages.push(CmdMessage::success(format!(
                "Logged into GitHub as {username}"
            )));
        }
        Service::Notes => {
            connector.note_store(&cache, prompter, &mut messages)?;
            messages.push(CmdMessage::success("Logged into the notes service"));
        }
    }
    if cache.path().is_none() {
        messages.push(CmdMessage::warning(
            "The credentials cache is disabled, you will be asked again next time",
        ));
    }
    Ok(CmdResult::default().with_messages(messages))
}

/// Forgets every cached credential.
pub fn logout(cache_path: Option<PathBuf>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let cache = AuthCache::new(cache_path, "");
    if cache.clear_all()? {
        result.add_message(CmdMessage::success("Logged out of every service"));
    } else {
        result.add_message(CmdMessage::info("Not logged in, nothing to do"));
    }
    Ok(result)
}

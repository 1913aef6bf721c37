//! Getting a logged-in backend for a command.

use crate::auth::{login, AuthCache};
use crate::backend::github::{GithubAuthenticator, GithubClient};
use crate::backend::memory::{InMemoryCodeHost, InMemoryNoteStore};
use crate::backend::notes::{NotesAuthenticator, NotesClient};
use crate::backend::{CodeHost, NoteStore};
use crate::commands::CmdMessage;
use crate::error::{IdeaseedError, Result};
use crate::prompt::Prompter;

/// Hands out backends, logging in on first use.
pub trait Connector {
    fn code_host(
        &mut self,
        cache: &AuthCache,
        prompter: &mut dyn Prompter,
        messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn CodeHost>;

    fn note_store(
        &mut self,
        cache: &AuthCache,
        prompter: &mut dyn Prompter,
        messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn NoteStore>;
}

/// Talks to the real services.
pub struct LiveConnector {
    github_api_url: String,
    notes_endpoint: Option<String>,
    github: Option<GithubClient>,
    notes: Option<NotesClient>,
}

impl LiveConnector {
    pub fn new(github_api_url: String, notes_endpoint: Option<String>) -> Self {
        Self {
            github_api_url,
            notes_endpoint,
            github: None,
            notes: None,
        }
    }
}

impl Connector for LiveConnector {
    fn code_host(
        &mut self,
        cache: &AuthCache,
        prompter: &mut dyn Prompter,
        messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn CodeHost> {
        if self.github.is_none() {
            let authenticator = GithubAuthenticator::new(self.github_api_url.clone());
            self.github = Some(login(&authenticator, cache, prompter, messages)?);
        }
        match self.github.as_mut() {
            Some(client) => Ok(client),
            None => Err(IdeaseedError::Authentication("not logged into github".into())),
        }
    }

    fn note_store(
        &mut self,
        cache: &AuthCache,
        prompter: &mut dyn Prompter,
        messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn NoteStore> {
        if self.notes.is_none() {
            let endpoint = self.notes_endpoint.clone().ok_or_else(|| {
                IdeaseedError::Config(
                    "The notes service endpoint is not set. \
                     Run `ideaseed config notes_endpoint <URL>` first."
                        .to_string(),
                )
            })?;
            let authenticator = NotesAuthenticator::new(endpoint);
            self.notes = Some(login(&authenticator, cache, prompter, messages)?);
        }
        match self.notes.as_mut() {
            Some(client) => Ok(client),
            None => Err(IdeaseedError::Authentication("not logged into notes".into())),
        }
    }
}

/// Hands out in-memory backends, no login involved.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    pub host: InMemoryCodeHost,
    pub notes: InMemoryNoteStore,
}

impl MemoryConnector {
    pub fn new(host: InMemoryCodeHost, notes: InMemoryNoteStore) -> Self {
        Self { host, notes }
    }
}

impl Connector for MemoryConnector {
    fn code_host(
        &mut self,
        _cache: &AuthCache,
        _prompter: &mut dyn Prompter,
        _messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn CodeHost> {
        Ok(&mut self.host)
    }

    fn note_store(
        &mut self,
        _cache: &AuthCache,
        _prompter: &mut dyn Prompter,
        _messages: &mut Vec<CmdMessage>,
    ) -> Result<&mut dyn NoteStore> {
        Ok(&mut self.notes)
    }
}

//! # Authentication Cache
//!
//! Credentials for every service live in one JSON document, one entry per
//! service name:
//!
//! ```text
//! { "github": { "token": "..." }, "notes": { "token": "..." } }
//! ```
//!
//! A missing or empty file means logged out everywhere. The file is read,
//! merged and written back on each operation and is never held open while the
//! user is being asked something. On Unix it is only readable by its owner.
//!
//! [`login`] implements the cache-or-prompt flow once for every backend: cached
//! credentials are tried first and dropped when they cannot be read or the
//! service rejects them, then the user is asked until the service accepts what
//! they typed. Only the prompter failing (Ctrl-C, closed stdin) ends the loop.

use crate::commands::CmdMessage;
use crate::error::{IdeaseedError, Result};
use crate::prompt::Prompter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One service's slot in the credentials file. A cache without a path is
/// disabled: reads find nothing and writes are dropped.
#[derive(Debug, Clone)]
pub struct AuthCache {
    path: Option<PathBuf>,
    service: String,
}

impl AuthCache {
    pub fn new(path: Option<PathBuf>, service: impl Into<String>) -> Self {
        Self {
            path,
            service: service.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_document(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(IdeaseedError::Config(format!(
                "{} is not a JSON object",
                path.display()
            ))),
        }
    }

    fn write_document(path: &Path, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(document)?;
        let mut file = fs::File::create(path)?;
        file.write_all(content.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Cached credentials for this service, if any.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let mut document = Self::read_document(path)?;
        match document.remove(&self.service) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(entry)) if entry.is_empty() => Ok(None),
            Some(entry) => Ok(Some(serde_json::from_value(entry)?)),
        }
    }

    /// Stores credentials for this service, keeping the other services' entries.
    pub fn write<T: Serialize>(&self, credentials: &T) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut document = Self::read_document(path)?;
        document.insert(self.service.clone(), serde_json::to_value(credentials)?);
        Self::write_document(path, &document)?;
        tracing::debug!(service = %self.service, path = %path.display(), "cached credentials");
        Ok(())
    }

    /// Forgets this service only. A file that is not a JSON object is
    /// replaced by an empty one.
    pub fn clear(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut document = match Self::read_document(path) {
            Ok(document) => document,
            Err(IdeaseedError::Serialization(_) | IdeaseedError::Config(_)) => {
                tracing::warn!(path = %path.display(), "credentials file is unreadable, resetting it");
                return Self::write_document(path, &Map::new());
            }
            Err(other) => return Err(other),
        };
        if document.remove(&self.service).is_some() {
            Self::write_document(path, &document)?;
            tracing::debug!(service = %self.service, "cleared cached credentials");
        }
        Ok(())
    }

    /// Deletes the whole file.
    pub fn clear_all(&self) -> Result<bool> {
        match &self.path {
            Some(path) if path.exists() => {
                fs::remove_file(path)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// A service that can be logged into.
pub trait Authenticator {
    /// What gets cached.
    type Credentials: Serialize + DeserializeOwned;
    /// What a successful login gives back.
    type Session;

    /// Key of this service in the credentials file.
    fn service(&self) -> &'static str;

    /// Asks the user for credentials. `token_only` is set once the service
    /// told us a password login cannot work (two-factor authentication).
    fn ask_credentials(
        &self,
        prompter: &mut dyn Prompter,
        token_only: bool,
    ) -> Result<Self::Credentials>;

    /// Checks the credentials against the service.
    fn authenticate(&self, credentials: &Self::Credentials) -> Result<Self::Session>;
}

/// Logs in with cached credentials, or by asking the user.
pub fn login<A: Authenticator>(
    authenticator: &A,
    cache: &AuthCache,
    prompter: &mut dyn Prompter,
    messages: &mut Vec<CmdMessage>,
) -> Result<A::Session> {
    let service = authenticator.service();
    tracing::info!(service, "logging in");

    let cached = match cache.read::<A::Credentials>() {
        Ok(cached) => cached,
        Err(e @ (IdeaseedError::Serialization(_) | IdeaseedError::Config(_))) => {
            tracing::warn!(service, error = %e, "unusable cached credentials");
            messages.push(CmdMessage::warning(format!(
                "The cached {service} credentials could not be read, clearing them."
            )));
            cache.clear()?;
            None
        }
        Err(other) => return Err(other),
    };

    if let Some(credentials) = cached {
        match authenticator.authenticate(&credentials) {
            Ok(session) => return Ok(session),
            Err(IdeaseedError::Authentication(_) | IdeaseedError::TwoFactorRequired) => {
                messages.push(CmdMessage::warning(format!(
                    "The cached {service} credentials were rejected, clearing them."
                )));
                cache.clear()?;
            }
            Err(other) => return Err(other),
        }
    }

    let mut token_only = false;
    loop {
        let credentials = authenticator.ask_credentials(prompter, token_only)?;
        match authenticator.authenticate(&credentials) {
            Ok(session) => {
                cache.write(&credentials)?;
                messages.push(CmdMessage::info(format!("Logged into {service}.")));
                return Ok(session);
            }
            Err(IdeaseedError::TwoFactorRequired) => {
                token_only = true;
                messages.push(CmdMessage::warning(
                    "Your account uses two-factor authentication. \
                     Please use a personal access token instead.",
                ));
            }
            Err(IdeaseedError::Authentication(reason)) => {
                messages.push(CmdMessage::warning(format!("Bad credentials: {reason}")));
            }
            Err(other) => return Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use serde::Deserialize;
    use std::cell::RefCell;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Token {
        token: String,
    }

    /// Accepts the token "good". Any password login needs two-factor.
    struct FakeService {
        tried: RefCell<Vec<String>>,
    }

    impl FakeService {
        fn new() -> Self {
            Self {
                tried: RefCell::new(Vec::new()),
            }
        }
    }

    impl Authenticator for FakeService {
        type Credentials = Token;
        type Session = String;

        fn service(&self) -> &'static str {
            "fake"
        }

        fn ask_credentials(&self, prompter: &mut dyn Prompter, token_only: bool) -> Result<Token> {
            if !token_only && prompter.select("Log in using", &["Token", "Password"])? == 1 {
                return Ok(Token {
                    token: format!("password:{}", prompter.password("Password")?),
                });
            }
            Ok(Token {
                token: prompter.password("Token")?,
            })
        }

        fn authenticate(&self, credentials: &Token) -> Result<String> {
            self.tried.borrow_mut().push(credentials.token.clone());
            if credentials.token.starts_with("password:") {
                return Err(IdeaseedError::TwoFactorRequired);
            }
            if credentials.token == "good" {
                Ok("session".to_string())
            } else {
                Err(IdeaseedError::Authentication("bad token".into()))
            }
        }
    }

    #[test]
    fn write_read_and_clear_keep_other_services() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.json");
        let github = AuthCache::new(Some(path.clone()), "github");
        let notes = AuthCache::new(Some(path.clone()), "notes");

        assert_eq!(github.read::<Token>().unwrap(), None);
        github.write(&Token { token: "a".into() }).unwrap();
        notes.write(&Token { token: "b".into() }).unwrap();

        assert_eq!(github.read::<Token>().unwrap().unwrap().token, "a");
        github.clear().unwrap();
        assert_eq!(github.read::<Token>().unwrap(), None);
        assert_eq!(notes.read::<Token>().unwrap().unwrap().token, "b");

        assert!(notes.clear_all().unwrap());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        AuthCache::new(Some(path.clone()), "github")
            .write(&Token { token: "a".into() })
            .unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn empty_file_means_logged_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "").unwrap();
        let cache = AuthCache::new(Some(path), "github");
        assert_eq!(cache.read::<Token>().unwrap(), None);
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = AuthCache::new(None, "github");
        cache.write(&Token { token: "a".into() }).unwrap();
        assert_eq!(cache.read::<Token>().unwrap(), None);
        assert!(!cache.clear_all().unwrap());
    }

    #[test]
    fn cached_credentials_skip_the_prompt() {
        let dir = tempdir().unwrap();
        let cache = AuthCache::new(Some(dir.path().join("auth.json")), "fake");
        cache.write(&Token { token: "good".into() }).unwrap();

        let service = FakeService::new();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let session = login(&service, &cache, &mut prompter, &mut messages).unwrap();
        assert_eq!(session, "session");
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn rejected_cache_is_cleared_and_user_is_asked() {
        let dir = tempdir().unwrap();
        let cache = AuthCache::new(Some(dir.path().join("auth.json")), "fake");
        cache.write(&Token { token: "stale".into() }).unwrap();

        let service = FakeService::new();
        let mut prompter = ScriptedPrompter::new().choose(0).text("good");
        let mut messages = Vec::new();
        login(&service, &cache, &mut prompter, &mut messages).unwrap();

        assert_eq!(*service.tried.borrow(), vec!["stale", "good"]);
        assert_eq!(cache.read::<Token>().unwrap().unwrap().token, "good");
    }

    #[test]
    fn two_factor_switches_to_token_login() {
        let dir = tempdir().unwrap();
        let cache = AuthCache::new(Some(dir.path().join("auth.json")), "fake");

        let service = FakeService::new();
        let mut prompter = ScriptedPrompter::new().choose(1).text("hunter2").text("good");
        let mut messages = Vec::new();
        login(&service, &cache, &mut prompter, &mut messages).unwrap();

        assert_eq!(prompter.asked, vec!["Log in using", "Password", "Token"]);
        assert!(messages
            .iter()
            .any(|m| m.content.contains("two-factor")));
    }

    #[test]
    fn keeps_asking_until_the_service_accepts() {
        let service = FakeService::new();
        let cache = AuthCache::new(None, "fake");
        let mut prompter = ScriptedPrompter::new();
        for token in ["a", "b", "c", "d", "good"] {
            prompter = prompter.choose(0).text(token);
        }
        let mut messages = Vec::new();
        let session = login(&service, &cache, &mut prompter, &mut messages).unwrap();

        assert_eq!(session, "session");
        assert_eq!(service.tried.borrow().len(), 5);
        let rejected = messages
            .iter()
            .filter(|m| m.content.starts_with("Bad credentials"))
            .count();
        assert_eq!(rejected, 4);
    }

    #[test]
    fn aborted_prompt_ends_the_login() {
        let service = FakeService::new();
        let cache = AuthCache::new(None, "fake");
        let mut prompter = ScriptedPrompter::new().choose(0).text("x");
        let mut messages = Vec::new();
        let err = login(&service, &cache, &mut prompter, &mut messages).unwrap_err();
        assert!(matches!(err, IdeaseedError::Prompt(_)));
    }

    #[test]
    fn unreadable_cache_entry_is_cleared_and_user_is_asked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, r#"{"fake": {"pat": "old"}, "other": {"token": "kept"}}"#).unwrap();
        let cache = AuthCache::new(Some(path.clone()), "fake");

        let service = FakeService::new();
        let mut prompter = ScriptedPrompter::new().choose(0).text("good");
        let mut messages = Vec::new();
        login(&service, &cache, &mut prompter, &mut messages).unwrap();

        assert_eq!(*service.tried.borrow(), vec!["good"]);
        assert!(messages[0].content.contains("could not be read"));
        assert_eq!(cache.read::<Token>().unwrap().unwrap().token, "good");
        let other = AuthCache::new(Some(path), "other");
        assert_eq!(other.read::<Token>().unwrap().unwrap().token, "kept");
    }

    #[test]
    fn corrupt_cache_file_is_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "{not json").unwrap();
        let cache = AuthCache::new(Some(path), "fake");

        let service = FakeService::new();
        let mut prompter = ScriptedPrompter::new().choose(0).text("good");
        let mut messages = Vec::new();
        login(&service, &cache, &mut prompter, &mut messages).unwrap();

        assert_eq!(cache.read::<Token>().unwrap().unwrap().token, "good");
    }
}

//! # Argument Resolution
//!
//! Turns a sparse command line into a fully typed [`InvocationOptions`].
//!
//! Resolution is a pure function of its inputs and happens in three steps:
//!
//! 1. **Positional roles**: the number of trailing tokens decides what each
//!    token means (see [`PositionalRoles::assign`]).
//! 2. **Flag merge**: every source (positional roles, command line, settings
//!    file, built-in defaults) is flattened into one ordered [`RawFlags`] list.
//!    Keys are canonicalized and, for duplicated keys, the first non-empty
//!    value wins. This is what lets a positional `REPO` beat `--repo`, and a
//!    command-line flag beat the settings file.
//! 3. **Validation**: combinations that cannot produce anything meaningful are
//!    rejected with [`IdeaseedError::Usage`] before any network access.
//!
//! The literal value `"<None>"` is a user-facing way of turning a feature off.
//! It becomes [`RawValue::Disabled`], which wins the merge like any other value
//! and then reads as "no value", so lower sources cannot fill the key back in.

use crate::color::Color;
use crate::error::{IdeaseedError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Sentinel accepted anywhere a flag value is expected, meaning "off".
pub const NONE_SENTINEL: &str = "<None>";

/// A flag value before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Absent,
    /// Explicitly turned off with `"<None>"`.
    Disabled,
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// Empty, false and absent values all lose the merge to any later non-empty value.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Absent => true,
            RawValue::Disabled => false,
            RawValue::Flag(on) => !on,
            RawValue::Text(text) => text.is_empty(),
            RawValue::List(items) => items.is_empty(),
        }
    }

    fn without_sentinel(self) -> Self {
        match self {
            RawValue::Text(text) if text == NONE_SENTINEL => RawValue::Disabled,
            RawValue::List(items) => RawValue::List(
                items
                    .into_iter()
                    .filter(|item| item != NONE_SENTINEL)
                    .collect(),
            ),
            other => other,
        }
    }
}

impl From<bool> for RawValue {
    fn from(on: bool) -> Self {
        RawValue::Flag(on)
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<Option<String>> for RawValue {
    fn from(text: Option<String>) -> Self {
        text.map_or(RawValue::Absent, RawValue::Text)
    }
}

impl From<Option<PathBuf>> for RawValue {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(RawValue::Absent, |p| {
            RawValue::Text(p.to_string_lossy().into_owned())
        })
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

/// Ordered, possibly duplicated, flag occurrences from every source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    entries: Vec<(String, RawValue)>,
}

impl RawFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a lower-priority source.
    pub fn extend(&mut self, other: RawFlags) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonicalizes keys and merges duplicates, first non-empty value wins.
    pub fn merge(self) -> FlagMap {
        let mut values: BTreeMap<String, RawValue> = BTreeMap::new();
        for (key, value) in self.entries {
            let key = canonical_key(&key);
            let value = match value.without_sentinel() {
                RawValue::List(items) => RawValue::List(dedup(items)),
                other => other,
            };
            match values.get(&key) {
                Some(existing) if !existing.is_empty() => {}
                Some(_) if value.is_empty() => {}
                _ => {
                    values.insert(key, value);
                }
            }
        }
        FlagMap { values }
    }
}

/// `--Default-Project` and `default_project` are the same key.
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('-')
        .replace('-', "_")
        .to_lowercase()
}

/// Command-line spelling of a canonical key, for error messages.
pub fn flag_name(key: &str) -> String {
    format!("--{}", key.replace('_', "-"))
}

/// Removes repeated items, keeping the first occurrence of each in place.
pub fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Merged flags, one value per canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMap {
    values: BTreeMap<String, RawValue>,
}

impl FlagMap {
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> Result<Option<String>> {
        match self.values.get(key) {
            None | Some(RawValue::Absent | RawValue::Disabled) => Ok(None),
            Some(RawValue::Text(text)) if text.is_empty() => Ok(None),
            Some(RawValue::Text(text)) => Ok(Some(text.clone())),
            Some(RawValue::List(items)) if items.len() == 1 => Ok(Some(items[0].clone())),
            Some(other) => Err(type_mismatch(key, "a single value", other)),
        }
    }

    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.values.get(key) {
            None | Some(RawValue::Absent | RawValue::Disabled) => Ok(false),
            Some(RawValue::Flag(on)) => Ok(*on),
            Some(RawValue::Text(text)) => match text.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" | "" => Ok(false),
                _ => Err(type_mismatch(key, "true or false", &RawValue::Text(text.clone()))),
            },
            Some(other) => Err(type_mismatch(key, "true or false", other)),
        }
    }

    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.values.get(key) {
            None | Some(RawValue::Absent | RawValue::Disabled) => Ok(Vec::new()),
            Some(RawValue::List(items)) => Ok(items.clone()),
            Some(RawValue::Text(text)) if text.is_empty() => Ok(Vec::new()),
            Some(RawValue::Text(text)) => Ok(vec![text.clone()]),
            Some(other) => Err(type_mismatch(key, "a list of values", other)),
        }
    }

    pub fn path(&self, key: &str) -> Result<Option<PathBuf>> {
        Ok(self.text(key)?.map(PathBuf::from))
    }
}

fn type_mismatch(key: &str, expected: &str, found: &RawValue) -> IdeaseedError {
    IdeaseedError::usage(format!(
        "{} expects {expected}, got {found:?}",
        flag_name(key)
    ))
}

/// Roles of the trailing positional tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalRoles {
    pub repo: Option<String>,
    pub project: Option<String>,
    pub column: Option<String>,
    pub title: Option<String>,
    pub body: String,
}

impl PositionalRoles {
    /// Maps 1 to 5 tokens onto their roles. Roles cannot be skipped: naming a
    /// column requires naming the repository and project before it.
    pub fn assign(tokens: &[String]) -> Result<Self> {
        let owned = |s: &String| Some(s.clone());
        match tokens {
            [body] => Ok(Self {
                body: body.clone(),
                ..Self::default()
            }),
            [title, body] => Ok(Self {
                title: owned(title),
                body: body.clone(),
                ..Self::default()
            }),
            [repo, title, body] => Ok(Self {
                repo: owned(repo),
                title: owned(title),
                body: body.clone(),
                ..Self::default()
            }),
            [repo, project, title, body] => Ok(Self {
                repo: owned(repo),
                project: owned(project),
                title: owned(title),
                body: body.clone(),
                ..Self::default()
            }),
            [repo, project, column, title, body] => Ok(Self {
                repo: owned(repo),
                project: owned(project),
                column: owned(column),
                title: owned(title),
                body: body.clone(),
            }),
            [] => Err(IdeaseedError::usage(
                "Nothing to write down: give at least the body of your idea",
            )),
            more => Err(IdeaseedError::usage(format!(
                "Too many arguments ({}): expected at most REPO PROJECT COLUMN TITLE BODY",
                more.len()
            ))),
        }
    }

    /// Highest-priority flag source.
    pub fn into_raw_flags(self) -> RawFlags {
        RawFlags::new()
            .with("repo", self.repo)
            .with("project", self.project)
            .with("column", self.column)
            .with("title", self.title)
            .with("body", self.body)
    }
}

/// Where the idea ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A repository's issues and project boards. Holds the repository as typed,
    /// possibly without its owner.
    Repository(String),
    /// The authenticated user's own project boards.
    Account,
    /// The note-taking service.
    Notes,
}

/// Every flag the create mode understands, typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    pub body: String,
    pub title: Option<String>,
    pub repo: Option<String>,
    pub project: Option<String>,
    pub column: Option<String>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub self_assign: bool,
    pub milestone: Option<String>,
    pub color: Color,
    pub pin: bool,
    pub create_missing: bool,
    pub no_issue: bool,
    pub dry_run: bool,
    pub open: bool,
    pub default_project: Option<String>,
    pub default_column: Option<String>,
    pub default_user_project: Option<String>,
    pub default_user_column: Option<String>,
    pub user_keyword: Option<String>,
    pub auth_cache: Option<PathBuf>,
    pub local_copy: Option<PathBuf>,
}

impl InvocationOptions {
    pub fn destination(&self) -> Destination {
        match &self.repo {
            Some(repo)
                if self
                    .user_keyword
                    .as_deref()
                    .is_some_and(|keyword| keyword.eq_ignore_ascii_case(repo)) =>
            {
                Destination::Account
            }
            Some(repo) => Destination::Repository(repo.clone()),
            None if self.project.is_some() => Destination::Account,
            None => Destination::Notes,
        }
    }

    /// Only repository placements create issues, and only without `--no-issue`.
    pub fn creates_issue(&self) -> bool {
        matches!(self.destination(), Destination::Repository(_)) && !self.no_issue
    }

    /// Explicit assignees, else the current user when self-assigning.
    pub fn assignees_for(&self, username: &str) -> Vec<String> {
        if !self.assignees.is_empty() {
            self.assignees.clone()
        } else if self.self_assign {
            vec![username.to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Resolves positional tokens and flags from every source into typed options.
///
/// `flags` must already be ordered by priority (command line first).
pub fn resolve(positionals: &[String], flags: RawFlags) -> Result<InvocationOptions> {
    let mut raw = PositionalRoles::assign(positionals)?.into_raw_flags();
    raw.extend(flags);
    let map = raw.merge();

    let body = map.text("body")?.unwrap_or_default();
    if body.trim().is_empty() {
        return Err(IdeaseedError::usage("The body of your idea is empty"));
    }

    let given_color = map.text("color")?;
    let color = match &given_color {
        Some(name) => name.parse::<Color>()?,
        None => Color::default(),
    };

    let mut labels = map.list("tag")?;
    labels.extend(map.list("label")?);

    let auth_cache = if map.flag("no_auth_cache")? {
        None
    } else {
        map.path("auth_cache")?
    };

    let options = InvocationOptions {
        body,
        title: map.text("title")?,
        repo: map.text("repo")?,
        project: map.text("project")?,
        column: map.text("column")?,
        labels: dedup(labels),
        assignees: dedup(map.list("assign_to")?),
        self_assign: !map.flag("no_self_assign")?,
        milestone: map.text("milestone")?,
        color,
        pin: map.flag("pin")?,
        create_missing: map.flag("create_missing")?,
        no_issue: map.flag("no_issue")?,
        dry_run: map.flag("dry_run")?,
        open: map.flag("open")?,
        default_project: map.text("default_project")?,
        default_column: map.text("default_column")?,
        default_user_project: map.text("default_user_project")?,
        default_user_column: map.text("default_user_column")?,
        user_keyword: map.text("user_keyword")?,
        auth_cache,
        local_copy: map.path("local_copy")?,
    };

    validate(&options, given_color.is_some())?;
    Ok(options)
}

/// Where credentials are cached, for commands that do not create anything.
pub fn resolve_auth_cache(flags: RawFlags) -> Result<Option<PathBuf>> {
    let map = flags.merge();
    if map.flag("no_auth_cache")? {
        return Ok(None);
    }
    map.path("auth_cache")
}

fn validate(options: &InvocationOptions, color_given: bool) -> Result<()> {
    let destination = options.destination();
    let on_board = destination != Destination::Notes;
    let issue = options.creates_issue();

    if !options.labels.is_empty() && !issue && on_board {
        let hint = match destination {
            Destination::Account => "cards on your profile never create an issue",
            _ => "remove --no-issue",
        };
        return Err(IdeaseedError::usage(format!(
            "--tag/--label can only be used when creating an issue or a note \
             (labels need an issue to be attached to: {hint})"
        )));
    }

    if on_board && !issue {
        let offending = issue_only_flags(options);
        if !offending.is_empty() {
            return Err(IdeaseedError::usage(format!(
                "The following options only work when an issue is created: {}",
                offending.join(", ")
            )));
        }
    }

    if !on_board && options.milestone.is_some() {
        return Err(IdeaseedError::usage(
            "--milestone is not available for notes. \
             Maybe you've forgotten to specify a repository?",
        ));
    }

    if options.no_issue {
        let has_project = options.project.is_some() || options.default_project.is_some();
        let has_column = options.column.is_some() || options.default_column.is_some();
        let placeable = match destination {
            Destination::Repository(_) => has_project && has_column,
            Destination::Account => true,
            Destination::Notes => false,
        };
        if !placeable {
            return Err(IdeaseedError::usage(
                "--no-issue needs a project and a column to put the card in: \
                 the card has to go somewhere",
            ));
        }
    }

    if destination == Destination::Account
        && options.project.is_none()
        && options.default_user_project.is_none()
    {
        return Err(IdeaseedError::usage(
            "Creating a card on your profile needs a project: \
             pass one or set --default-user-project",
        ));
    }

    if on_board {
        let mut notes_only = Vec::new();
        if color_given {
            notes_only.push("--color");
        }
        if options.pin {
            notes_only.push("--pin");
        }
        if !notes_only.is_empty() {
            return Err(IdeaseedError::usage(format!(
                "The following options only work for notes: {}",
                notes_only.join(", ")
            )));
        }
    }

    Ok(())
}

fn issue_only_flags(options: &InvocationOptions) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if options.milestone.is_some() {
        flags.push("--milestone");
    }
    if !options.assignees.is_empty() {
        flags.push("--assign-to");
    }
    flags
}

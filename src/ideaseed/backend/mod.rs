//! # Backends
//!
//! Remote services are abstracted behind two traits so that the placement
//! engine never knows which implementation it is talking to:
//!
//! - [`CodeHost`]: repositories, project boards, labels, milestones, issues.
//! - [`NoteStore`]: a note-taking service with tags.
//!
//! ## Implementations
//!
//! - [`github::GithubClient`]: REST client for GitHub (classic projects).
//! - [`notes::NotesClient`]: GraphQL client for the notes service.
//! - [`memory::InMemoryCodeHost`], [`memory::InMemoryNoteStore`]: in-process
//!   backends for tests, recording every write they receive.
//! - [`dry_run::DryRunCodeHost`], [`dry_run::DryRunNoteStore`]: decorators
//!   that let every lookup through and turn every write into a planned write.
//!
//! Reads take `&self`, writes take `&mut self`. Handles are plain data and
//! are fetched again on every invocation.

use crate::color::Color;
use crate::error::{IdeaseedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dry_run;
pub mod github;
pub mod memory;
pub mod notes;

/// `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parses `owner/name`, or a bare `name` owned by `username`.
    pub fn parse(repo: &str, username: &str) -> Result<Self> {
        match repo.split_once('/') {
            None if !repo.is_empty() => Ok(Self {
                owner: username.to_string(),
                name: repo.to_string(),
            }),
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(IdeaseedError::usage(format!(
                "Invalid repository {repo:?}: expected OWNER/NAME or NAME"
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(rename = "html_url", default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: MilestoneState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    #[serde(rename = "html_url")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub url: String,
}

/// Body of an issue creation request. A missing milestone is left out of the
/// payload rather than sent as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

/// What a project card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardContent {
    /// Card pointing at an issue, by the issue's id (not its number).
    Issue(u64),
    /// Free text card.
    Note(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub body: String,
    pub color: Color,
    pub pinned: bool,
    pub labels: Vec<String>,
    pub collaborators: Vec<String>,
}

/// A write a backend received, or would have received on a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// `repo` is `None` for a project on the user's own profile.
    CreateProject {
        repo: Option<RepoRef>,
        name: String,
    },
    CreateColumn {
        project: String,
        name: String,
    },
    CreateLabel {
        repo: RepoRef,
        name: String,
    },
    CreateMilestone {
        repo: RepoRef,
        title: String,
    },
    CreateIssue {
        repo: RepoRef,
        draft: IssueDraft,
    },
    CreateCard {
        column: String,
        content: CardContent,
    },
    CreateTag {
        name: String,
    },
    CreateNote {
        draft: NoteDraft,
    },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::CreateProject { repo: Some(repo), name } => {
                write!(f, "create project '{name}' in {repo}")
            }
            Mutation::CreateProject { repo: None, name } => {
                write!(f, "create project '{name}' on your profile")
            }
            Mutation::CreateColumn { project, name } => {
                write!(f, "create column '{name}' in project '{project}'")
            }
            Mutation::CreateLabel { repo, name } => write!(f, "create label '{name}' in {repo}"),
            Mutation::CreateMilestone { repo, title } => {
                write!(f, "create milestone '{title}' in {repo}")
            }
            Mutation::CreateIssue { repo, draft } => {
                write!(f, "create issue '{}' in {repo}", draft.title)?;
                if !draft.labels.is_empty() {
                    write!(f, " labelled {}", draft.labels.join(", "))?;
                }
                if !draft.assignees.is_empty() {
                    write!(f, " assigned to {}", draft.assignees.join(", "))?;
                }
                Ok(())
            }
            Mutation::CreateCard {
                column,
                content: CardContent::Issue(_),
            } => write!(f, "add the issue to column '{column}'"),
            Mutation::CreateCard {
                column,
                content: CardContent::Note(_),
            } => write!(f, "add a note card to column '{column}'"),
            Mutation::CreateTag { name } => write!(f, "create tag '{name}'"),
            Mutation::CreateNote { draft } => match &draft.title {
                Some(title) => write!(f, "create {} note '{title}'", draft.color),
                None => write!(f, "create {} note", draft.color),
            },
        }
    }
}

pub trait CodeHost {
    /// Login of the authenticated user.
    fn username(&self) -> Result<String>;

    fn repo_projects(&self, repo: &RepoRef) -> Result<Vec<Project>>;
    fn create_repo_project(
        &mut self,
        repo: &RepoRef,
        name: &str,
        description: &str,
    ) -> Result<Project>;

    /// Projects owned by the authenticated user.
    fn user_projects(&self) -> Result<Vec<Project>>;
    fn create_user_project(&mut self, name: &str, description: &str) -> Result<Project>;

    fn columns(&self, project: &Project) -> Result<Vec<Column>>;
    fn create_column(&mut self, project: &Project, name: &str) -> Result<Column>;

    fn labels(&self, repo: &RepoRef) -> Result<Vec<Label>>;
    fn create_label(&mut self, repo: &RepoRef, label: &Label) -> Result<Label>;

    /// Open and closed milestones.
    fn milestones(&self, repo: &RepoRef) -> Result<Vec<Milestone>>;
    fn create_milestone(&mut self, repo: &RepoRef, title: &str) -> Result<Milestone>;

    fn create_issue(&mut self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue>;
    fn create_card(&mut self, column: &Column, content: &CardContent) -> Result<Card>;
}

pub trait NoteStore {
    fn tags(&self) -> Result<Vec<NoteLabel>>;
    fn create_tag(&mut self, name: &str) -> Result<NoteLabel>;
    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note>;
}

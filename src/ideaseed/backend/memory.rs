use super::{
    Card, CardContent, CodeHost, Column, Issue, IssueDraft, Label, Milestone, MilestoneState,
    Mutation, Note, NoteDraft, NoteLabel, NoteStore, Project, RepoRef,
};
use crate::error::{IdeaseedError, Result};
use std::collections::HashMap;

const BASE_URL: &str = "https://github.test";

fn not_found(what: String) -> IdeaseedError {
    IdeaseedError::Api {
        service: "memory".to_string(),
        status: 404,
        message: format!("{what} not found"),
    }
}

/// In-memory code host for tests. Does NOT persist data.
///
/// Every write is appended to [`InMemoryCodeHost::mutations`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeHost {
    username: String,
    repo_projects: HashMap<RepoRef, Vec<Project>>,
    user_projects: Vec<Project>,
    columns: HashMap<u64, Vec<Column>>,
    labels: HashMap<RepoRef, Vec<Label>>,
    milestones: HashMap<RepoRef, Vec<Milestone>>,
    issues: HashMap<RepoRef, Vec<IssueDraft>>,
    cards: HashMap<u64, Vec<CardContent>>,
    last_id: u64,
    pub mutations: Vec<Mutation>,
}

impl InMemoryCodeHost {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    fn repo(&self, repo: &str) -> RepoRef {
        match repo.split_once('/') {
            Some((owner, name)) => RepoRef {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            None => RepoRef {
                owner: self.username.clone(),
                name: repo.to_string(),
            },
        }
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn project(&mut self, owner: &str, name: &str) -> Project {
        let id = self.next_id();
        Project {
            id,
            name: name.to_string(),
            url: format!("{BASE_URL}/{owner}/projects/{id}"),
        }
    }

    fn find_project(&self, name: &str) -> Option<&Project> {
        self.repo_projects
            .values()
            .flatten()
            .chain(self.user_projects.iter())
            .find(|p| p.name == name)
    }

    pub fn with_repo_project(mut self, repo: &str, name: &str) -> Self {
        let repo = self.repo(repo);
        let project = self.project(&repo.to_string(), name);
        self.repo_projects.entry(repo).or_default().push(project);
        self
    }

    pub fn with_user_project(mut self, name: &str) -> Self {
        let owner = self.username.clone();
        let project = self.project(&owner, name);
        self.user_projects.push(project);
        self
    }

    /// Adds a column to the project named `project`, which must already exist.
    pub fn with_column(mut self, project: &str, name: &str) -> Self {
        let id = self.next_id();
        if let Some(project_id) = self.find_project(project).map(|p| p.id) {
            self.columns.entry(project_id).or_default().push(Column {
                id,
                name: name.to_string(),
            });
        }
        self
    }

    pub fn with_label(mut self, repo: &str, name: &str) -> Self {
        let repo = self.repo(repo);
        self.labels.entry(repo).or_default().push(Label {
            name: name.to_string(),
            color: "ededed".to_string(),
            description: None,
        });
        self
    }

    pub fn with_milestone(mut self, repo: &str, title: &str, state: MilestoneState) -> Self {
        let repo = self.repo(repo);
        let milestones = self.milestones.entry(repo).or_default();
        let number = milestones.len() as u64 + 1;
        milestones.push(Milestone {
            number,
            title: title.to_string(),
            state,
        });
        self
    }

    pub fn issues(&self, repo: &str) -> Vec<IssueDraft> {
        self.issues.get(&self.repo(repo)).cloned().unwrap_or_default()
    }

    /// Cards of every column named `column`.
    pub fn cards(&self, column: &str) -> Vec<CardContent> {
        self.columns
            .values()
            .flatten()
            .filter(|c| c.name == column)
            .flat_map(|c| self.cards.get(&c.id).cloned().unwrap_or_default())
            .collect()
    }

    pub fn project_names(&self, repo: Option<&str>) -> Vec<String> {
        let projects = match repo {
            Some(repo) => self
                .repo_projects
                .get(&self.repo(repo))
                .cloned()
                .unwrap_or_default(),
            None => self.user_projects.clone(),
        };
        projects.into_iter().map(|p| p.name).collect()
    }
}

impl CodeHost for InMemoryCodeHost {
    fn username(&self) -> Result<String> {
        Ok(self.username.clone())
    }

    fn repo_projects(&self, repo: &RepoRef) -> Result<Vec<Project>> {
        Ok(self.repo_projects.get(repo).cloned().unwrap_or_default())
    }

    fn create_repo_project(
        &mut self,
        repo: &RepoRef,
        name: &str,
        _description: &str,
    ) -> Result<Project> {
        self.mutations.push(Mutation::CreateProject {
            repo: Some(repo.clone()),
            name: name.to_string(),
        });
        let project = self.project(&repo.to_string(), name);
        self.repo_projects
            .entry(repo.clone())
            .or_default()
            .push(project.clone());
        Ok(project)
    }

    fn user_projects(&self) -> Result<Vec<Project>> {
        Ok(self.user_projects.clone())
    }

    fn create_user_project(&mut self, name: &str, _description: &str) -> Result<Project> {
        self.mutations.push(Mutation::CreateProject {
            repo: None,
            name: name.to_string(),
        });
        let owner = self.username.clone();
        let project = self.project(&owner, name);
        self.user_projects.push(project.clone());
        Ok(project)
    }

    fn columns(&self, project: &Project) -> Result<Vec<Column>> {
        Ok(self.columns.get(&project.id).cloned().unwrap_or_default())
    }

    fn create_column(&mut self, project: &Project, name: &str) -> Result<Column> {
        self.mutations.push(Mutation::CreateColumn {
            project: project.name.clone(),
            name: name.to_string(),
        });
        let column = Column {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.columns
            .entry(project.id)
            .or_default()
            .push(column.clone());
        Ok(column)
    }

    fn labels(&self, repo: &RepoRef) -> Result<Vec<Label>> {
        Ok(self.labels.get(repo).cloned().unwrap_or_default())
    }

    fn create_label(&mut self, repo: &RepoRef, label: &Label) -> Result<Label> {
        self.mutations.push(Mutation::CreateLabel {
            repo: repo.clone(),
            name: label.name.clone(),
        });
        self.labels
            .entry(repo.clone())
            .or_default()
            .push(label.clone());
        Ok(label.clone())
    }

    fn milestones(&self, repo: &RepoRef) -> Result<Vec<Milestone>> {
        Ok(self.milestones.get(repo).cloned().unwrap_or_default())
    }

    fn create_milestone(&mut self, repo: &RepoRef, title: &str) -> Result<Milestone> {
        self.mutations.push(Mutation::CreateMilestone {
            repo: repo.clone(),
            title: title.to_string(),
        });
        let milestones = self.milestones.entry(repo.clone()).or_default();
        let milestone = Milestone {
            number: milestones.len() as u64 + 1,
            title: title.to_string(),
            state: MilestoneState::Open,
        };
        milestones.push(milestone.clone());
        Ok(milestone)
    }

    fn create_issue(&mut self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue> {
        self.mutations.push(Mutation::CreateIssue {
            repo: repo.clone(),
            draft: draft.clone(),
        });
        let id = self.next_id();
        let issues = self.issues.entry(repo.clone()).or_default();
        issues.push(draft.clone());
        let number = issues.len() as u64;
        Ok(Issue {
            id,
            number,
            url: format!("{BASE_URL}/{repo}/issues/{number}"),
        })
    }

    fn create_card(&mut self, column: &Column, content: &CardContent) -> Result<Card> {
        if !self.columns.values().flatten().any(|c| c.id == column.id) {
            return Err(not_found(format!("column {}", column.id)));
        }
        self.mutations.push(Mutation::CreateCard {
            column: column.name.clone(),
            content: content.clone(),
        });
        self.cards
            .entry(column.id)
            .or_default()
            .push(content.clone());
        Ok(Card { id: self.next_id() })
    }
}

/// In-memory note store for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteStore {
    tags: Vec<NoteLabel>,
    notes: Vec<NoteDraft>,
    pub mutations: Vec<Mutation>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, name: &str) -> Self {
        self.tags.push(NoteLabel {
            name: name.to_string(),
        });
        self
    }

    pub fn notes(&self) -> &[NoteDraft] {
        &self.notes
    }
}

impl NoteStore for InMemoryNoteStore {
    fn tags(&self) -> Result<Vec<NoteLabel>> {
        Ok(self.tags.clone())
    }

    fn create_tag(&mut self, name: &str) -> Result<NoteLabel> {
        self.mutations.push(Mutation::CreateTag {
            name: name.to_string(),
        });
        let tag = NoteLabel {
            name: name.to_string(),
        };
        self.tags.push(tag.clone());
        Ok(tag)
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note> {
        self.mutations.push(Mutation::CreateNote {
            draft: draft.clone(),
        });
        self.notes.push(draft.clone());
        let id = format!("note-{}", self.notes.len());
        Ok(Note {
            url: format!("https://notes.test/#{id}"),
            id,
        })
    }
}

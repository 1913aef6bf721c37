//! Dry-run decorators.
//!
//! Lookups go to the wrapped backend. Writes never reach it: they are recorded
//! as [`Mutation`]s and answered with synthesized handles so that the rest of
//! the placement runs exactly as it would for real. Synthesized ids count down
//! from `u64::MAX`, and lookups under a synthesized parent return nothing
//! since the parent does not exist remotely.

use super::{
    Card, CardContent, CodeHost, Column, Issue, IssueDraft, Label, Milestone, MilestoneState,
    Mutation, Note, NoteDraft, NoteLabel, NoteStore, Project, RepoRef,
};
use crate::error::Result;

#[derive(Debug, Default)]
struct Planner {
    planned: Vec<Mutation>,
    issued: u64,
}

impl Planner {
    fn next_id(&mut self) -> u64 {
        self.issued += 1;
        u64::MAX - self.issued + 1
    }

    fn is_synthetic(&self, id: u64) -> bool {
        id > u64::MAX - self.issued
    }

    fn plan(&mut self, mutation: Mutation) {
        tracing::info!(%mutation, "dry run, skipping write");
        self.planned.push(mutation);
    }
}

pub struct DryRunCodeHost<'a> {
    inner: &'a dyn CodeHost,
    planner: Planner,
}

impl<'a> DryRunCodeHost<'a> {
    pub fn new(inner: &'a dyn CodeHost) -> Self {
        Self {
            inner,
            planner: Planner::default(),
        }
    }

    /// Writes that would have been made, in order.
    pub fn into_planned(self) -> Vec<Mutation> {
        self.planner.planned
    }
}

impl CodeHost for DryRunCodeHost<'_> {
    fn username(&self) -> Result<String> {
        self.inner.username()
    }

    fn repo_projects(&self, repo: &RepoRef) -> Result<Vec<Project>> {
        self.inner.repo_projects(repo)
    }

    fn create_repo_project(
        &mut self,
        repo: &RepoRef,
        name: &str,
        _description: &str,
    ) -> Result<Project> {
        self.planner.plan(Mutation::CreateProject {
            repo: Some(repo.clone()),
            name: name.to_string(),
        });
        Ok(Project {
            id: self.planner.next_id(),
            name: name.to_string(),
            url: String::new(),
        })
    }

    fn user_projects(&self) -> Result<Vec<Project>> {
        self.inner.user_projects()
    }

    fn create_user_project(&mut self, name: &str, _description: &str) -> Result<Project> {
        self.planner.plan(Mutation::CreateProject {
            repo: None,
            name: name.to_string(),
        });
        Ok(Project {
            id: self.planner.next_id(),
            name: name.to_string(),
            url: String::new(),
        })
    }

    fn columns(&self, project: &Project) -> Result<Vec<Column>> {
        if self.planner.is_synthetic(project.id) {
            return Ok(Vec::new());
        }
        self.inner.columns(project)
    }

    fn create_column(&mut self, project: &Project, name: &str) -> Result<Column> {
        self.planner.plan(Mutation::CreateColumn {
            project: project.name.clone(),
            name: name.to_string(),
        });
        Ok(Column {
            id: self.planner.next_id(),
            name: name.to_string(),
        })
    }

    fn labels(&self, repo: &RepoRef) -> Result<Vec<Label>> {
        self.inner.labels(repo)
    }

    fn create_label(&mut self, repo: &RepoRef, label: &Label) -> Result<Label> {
        self.planner.plan(Mutation::CreateLabel {
            repo: repo.clone(),
            name: label.name.clone(),
        });
        Ok(label.clone())
    }

    fn milestones(&self, repo: &RepoRef) -> Result<Vec<Milestone>> {
        self.inner.milestones(repo)
    }

    fn create_milestone(&mut self, repo: &RepoRef, title: &str) -> Result<Milestone> {
        self.planner.plan(Mutation::CreateMilestone {
            repo: repo.clone(),
            title: title.to_string(),
        });
        Ok(Milestone {
            number: self.planner.next_id(),
            title: title.to_string(),
            state: MilestoneState::Open,
        })
    }

    fn create_issue(&mut self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue> {
        self.planner.plan(Mutation::CreateIssue {
            repo: repo.clone(),
            draft: draft.clone(),
        });
        let id = self.planner.next_id();
        Ok(Issue {
            id,
            number: id,
            url: String::new(),
        })
    }

    fn create_card(&mut self, column: &Column, content: &CardContent) -> Result<Card> {
        self.planner.plan(Mutation::CreateCard {
            column: column.name.clone(),
            content: content.clone(),
        });
        Ok(Card {
            id: self.planner.next_id(),
        })
    }
}

pub struct DryRunNoteStore<'a> {
    inner: &'a dyn NoteStore,
    planner: Planner,
}

impl<'a> DryRunNoteStore<'a> {
    pub fn new(inner: &'a dyn NoteStore) -> Self {
        Self {
            inner,
            planner: Planner::default(),
        }
    }

    pub fn into_planned(self) -> Vec<Mutation> {
        self.planner.planned
    }
}

impl NoteStore for DryRunNoteStore<'_> {
    fn tags(&self) -> Result<Vec<NoteLabel>> {
        self.inner.tags()
    }

    fn create_tag(&mut self, name: &str) -> Result<NoteLabel> {
        self.planner.plan(Mutation::CreateTag {
            name: name.to_string(),
        });
        Ok(NoteLabel {
            name: name.to_string(),
        })
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note> {
        self.planner.plan(Mutation::CreateNote {
            draft: draft.clone(),
        });
        Ok(Note {
            id: self.planner.next_id().to_string(),
            url: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryCodeHost;

    #[test]
    fn writes_are_planned_not_sent() {
        let host = InMemoryCodeHost::new("alice").with_user_project("ideas");
        let mut dry = DryRunCodeHost::new(&host);

        let project = dry.create_user_project("new", "").unwrap();
        assert_eq!(project.id, u64::MAX);
        assert!(dry.columns(&project).unwrap().is_empty());
        let column = dry.create_column(&project, "To Do").unwrap();
        assert_eq!(column.id, u64::MAX - 1);

        assert_eq!(dry.into_planned().len(), 2);
        assert!(host.mutations.is_empty());
        assert_eq!(host.project_names(None), vec!["ideas"]);
    }

    #[test]
    fn lookups_reach_the_real_backend() {
        let host = InMemoryCodeHost::new("alice")
            .with_user_project("ideas")
            .with_column("ideas", "Inbox");
        let dry = DryRunCodeHost::new(&host);
        let project = dry.user_projects().unwrap().remove(0);
        assert_eq!(dry.columns(&project).unwrap()[0].name, "Inbox");
    }
}

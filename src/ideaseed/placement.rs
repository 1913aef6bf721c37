//! # Card Placement
//!
//! Decides where an idea goes and performs the creation sequence.
//!
//! Destinations form a closed set (see [`Destination`]):
//!
//! ```text
//! repository  project → column → labels → milestone → issue (+ card) | note card
//! account     project → column → note card
//! notes       tags → note
//! ```
//!
//! Each named object goes through [`Resolution::find_or_create`]. The first
//! object that is missing, or whose creation the user declines, stops the whole
//! placement with [`PlacementOutcome::Aborted`]. Objects created before that
//! point stay created: there is no rollback.
//!
//! Dry runs wrap the backend in a dry-run decorator, so every lookup and every
//! question happens exactly as it would for real while no write is sent.

use crate::backend::dry_run::{DryRunCodeHost, DryRunNoteStore};
use crate::backend::{
    CardContent, CodeHost, Column, IssueDraft, Label, MilestoneState, Mutation, NoteDraft,
    NoteStore, Project, RepoRef,
};
use crate::commands::CmdMessage;
use crate::defaults::{resolve_defaults, Scope};
use crate::error::{IdeaseedError, Result};
use crate::options::{Destination, InvocationOptions};
use crate::resolver::{ObjectKind, Resolution};

/// Names everything ended up attached to. A column always comes with a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPlacement {
    pub project: Option<String>,
    pub column: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub assignees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub destination: Destination,
    pub placement: ResolvedPlacement,
    /// Absent on dry runs.
    pub url: Option<String>,
    pub repo: Option<RepoRef>,
    pub username: Option<String>,
    pub issue_number: Option<u64>,
    /// Writes skipped because of a dry run.
    pub planned: Vec<Mutation>,
}

impl PlacementReport {
    fn new(destination: Destination) -> Self {
        Self {
            destination,
            placement: ResolvedPlacement::default(),
            url: None,
            repo: None,
            username: None,
            issue_number: None,
            planned: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(PlacementReport),
    /// Something was missing or the user said no. Diagnostics are in the messages.
    Aborted,
}

impl PlacementOutcome {
    fn dry_run(self, planned: Vec<Mutation>) -> Self {
        match self {
            PlacementOutcome::Placed(report) => PlacementOutcome::Placed(PlacementReport {
                url: None,
                issue_number: None,
                planned,
                ..report
            }),
            PlacementOutcome::Aborted => PlacementOutcome::Aborted,
        }
    }
}

/// Text of a free-standing card.
pub fn card_note(title: Option<&str>, body: &str) -> String {
    match title {
        Some(title) => format!("# {title}\n\n{body}"),
        None => body.to_string(),
    }
}

/// Object names are matched ignoring case, like [`Resolution::find_or_create`] does.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Six hex digits.
fn random_label_color() -> String {
    format!("{:06x}", rand::random::<u32>() & 0xFF_FFFF)
}

fn non_empty(url: String) -> Option<String> {
    (!url.is_empty()).then_some(url)
}

/// Places the idea on the code host, in a repository or on the user's profile.
pub fn place_on_code_host(
    host: &mut dyn CodeHost,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    if options.dry_run {
        let mut dry = DryRunCodeHost::new(&*host);
        let outcome = place_with(&mut dry, options, resolution)?;
        return Ok(outcome.dry_run(dry.into_planned()));
    }
    place_with(host, options, resolution)
}

fn place_with(
    host: &mut dyn CodeHost,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    match options.destination() {
        Destination::Repository(repo) => place_in_repository(host, &repo, options, resolution),
        Destination::Account => place_in_account(host, options, resolution),
        Destination::Notes => Err(IdeaseedError::usage(
            "Notes are not stored on the code host, give a repository or a project",
        )),
    }
}

/// Places the idea in the note-taking service.
pub fn place_on_note_store(
    store: &mut dyn NoteStore,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    if options.dry_run {
        let mut dry = DryRunNoteStore::new(&*store);
        let outcome = place_in_notes(&mut dry, options, resolution)?;
        return Ok(outcome.dry_run(dry.into_planned()));
    }
    place_in_notes(store, options, resolution)
}

/// Finds or creates a project then a column in it. `None` means abort.
fn resolve_board(
    host: &mut dyn CodeHost,
    repo: Option<&RepoRef>,
    project_name: &str,
    column_name: &str,
    resolution: &mut Resolution<'_>,
) -> Result<Option<(Project, Column)>> {
    let candidates = match repo {
        Some(repo) => host.repo_projects(repo)?,
        None => host.user_projects()?,
    };
    let project = resolution.find_or_create(
        ObjectKind::Project,
        project_name,
        candidates,
        |p| p.name.as_str(),
        |prompter| {
            let description = prompter.text("Enter the project's description", Some(""))?;
            match repo {
                Some(repo) => host.create_repo_project(repo, project_name, &description),
                None => host.create_user_project(project_name, &description),
            }
        },
    )?;
    let Some(project) = project else {
        return Ok(None);
    };

    let candidates = host.columns(&project)?;
    let column = resolution.find_or_create(
        ObjectKind::Column,
        column_name,
        candidates,
        |c| c.name.as_str(),
        |_| host.create_column(&project, column_name),
    )?;
    Ok(column.map(|column| (project, column)))
}

pub fn place_in_repository(
    host: &mut dyn CodeHost,
    repo: &str,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    let username = host.username()?;
    let repo = RepoRef::parse(repo, &username)?;
    let scope = Scope::Repository {
        owner: repo.owner.clone(),
        name: repo.name.clone(),
        username: username.clone(),
    };
    let (project_name, column_name) = resolve_defaults(
        options.project.as_deref(),
        options.column.as_deref(),
        options.default_project.as_deref(),
        options.default_column.as_deref(),
        &scope,
    )?;
    tracing::info!(%repo, ?project_name, ?column_name, "placing in repository");

    let mut report = PlacementReport::new(Destination::Repository(repo.to_string()));

    let board = match (&project_name, &column_name) {
        (Some(project), Some(column)) => {
            match resolve_board(host, Some(&repo), project, column, resolution)? {
                Some(board) => Some(board),
                None => return Ok(PlacementOutcome::Aborted),
            }
        }
        (Some(project), None) => {
            resolution.messages.push(CmdMessage::warning(format!(
                "No column to put the card in for project '{project}', \
                 the issue will not be added to a board"
            )));
            None
        }
        _ => None,
    };

    let mut known_labels = if options.labels.is_empty() {
        Vec::new()
    } else {
        host.labels(&repo)?
    };
    let mut labels: Vec<String> = Vec::with_capacity(options.labels.len());
    for name in &options.labels {
        let label = resolution.find_or_create(
            ObjectKind::Label,
            name,
            known_labels.iter().cloned(),
            |l| l.name.as_str(),
            |prompter| {
                let description =
                    prompter.text("A short description of your label", Some(""))?;
                let label = Label {
                    name: name.clone(),
                    color: random_label_color(),
                    description: (!description.is_empty()).then_some(description),
                };
                host.create_label(&repo, &label)
            },
        )?;
        let Some(label) = label else {
            return Ok(PlacementOutcome::Aborted);
        };
        if !labels.iter().any(|known| same_name(known, &label.name)) {
            labels.push(label.name.clone());
        }
        if !known_labels.iter().any(|known| same_name(&known.name, &label.name)) {
            known_labels.push(label);
        }
    }

    let milestone = match &options.milestone {
        None => None,
        Some(title) => {
            let candidates = host.milestones(&repo)?;
            let found = resolution.find_or_create(
                ObjectKind::Milestone,
                title,
                candidates,
                |m| m.title.as_str(),
                |_| host.create_milestone(&repo, title),
            )?;
            let Some(milestone) = found else {
                return Ok(PlacementOutcome::Aborted);
            };
            if milestone.state == MilestoneState::Closed {
                let question = format!(
                    "Milestone '{}' is closed. Assign the issue to it anyway?",
                    milestone.title
                );
                if !resolution.prompter.confirm(&question, false)? {
                    resolution.messages.push(CmdMessage::warning(format!(
                        "Not assigning the issue to the closed milestone '{}'",
                        milestone.title
                    )));
                    return Ok(PlacementOutcome::Aborted);
                }
            }
            Some(milestone)
        }
    };

    if options.no_issue {
        let Some((project, column)) = board else {
            return Err(IdeaseedError::usage(
                "--no-issue needs a project and a column to put the card in",
            ));
        };
        let note = card_note(options.title.as_deref(), &options.body);
        host.create_card(&column, &CardContent::Note(note))?;
        report.url = non_empty(project.url);
        report.placement.project = Some(project.name);
        report.placement.column = Some(column.name);
    } else {
        let assignees = options.assignees_for(&username);
        let draft = IssueDraft {
            title: options.title.clone().unwrap_or_else(|| options.body.clone()),
            body: if options.title.is_some() {
                options.body.clone()
            } else {
                String::new()
            },
            assignees: assignees.clone(),
            labels: labels.clone(),
            milestone: milestone.as_ref().map(|m| m.number),
        };
        let issue = host.create_issue(&repo, &draft)?;
        if let Some((project, column)) = board {
            host.create_card(&column, &CardContent::Issue(issue.id))?;
            report.placement.project = Some(project.name);
            report.placement.column = Some(column.name);
        } else {
            report.placement.project = project_name;
        }
        report.url = non_empty(issue.url);
        report.issue_number = Some(issue.number);
        report.placement.assignees = assignees;
    }

    report.placement.labels = labels;
    report.placement.milestone = milestone.map(|m| m.title);
    report.repo = Some(repo);
    report.username = Some(username);
    Ok(PlacementOutcome::Placed(report))
}

pub fn place_in_account(
    host: &mut dyn CodeHost,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    let username = host.username()?;
    let scope = Scope::Account {
        username: username.clone(),
    };
    let (project_name, column_name) = resolve_defaults(
        options.project.as_deref(),
        options.column.as_deref(),
        options.default_user_project.as_deref(),
        options.default_user_column.as_deref(),
        &scope,
    )?;
    let (Some(project_name), Some(column_name)) = (project_name, column_name) else {
        return Err(IdeaseedError::usage(
            "A card on your profile needs a project and a column: \
             pass them or set --default-user-project and --default-user-column",
        ));
    };
    tracing::info!(%username, %project_name, %column_name, "placing on profile");

    let Some((project, column)) =
        resolve_board(host, None, &project_name, &column_name, resolution)?
    else {
        return Ok(PlacementOutcome::Aborted);
    };

    let note = card_note(options.title.as_deref(), &options.body);
    host.create_card(&column, &CardContent::Note(note))?;

    let mut report = PlacementReport::new(Destination::Account);
    report.url = non_empty(project.url);
    report.placement.project = Some(project.name);
    report.placement.column = Some(column.name);
    report.username = Some(username);
    Ok(PlacementOutcome::Placed(report))
}

pub fn place_in_notes(
    store: &mut dyn NoteStore,
    options: &InvocationOptions,
    resolution: &mut Resolution<'_>,
) -> Result<PlacementOutcome> {
    let mut known_tags = if options.labels.is_empty() {
        Vec::new()
    } else {
        store.tags()?
    };
    let mut labels: Vec<String> = Vec::with_capacity(options.labels.len());
    for name in &options.labels {
        let tag = resolution.find_or_create(
            ObjectKind::Tag,
            name,
            known_tags.iter().cloned(),
            |t| t.name.as_str(),
            |_| store.create_tag(name),
        )?;
        let Some(tag) = tag else {
            return Ok(PlacementOutcome::Aborted);
        };
        if !labels.iter().any(|known| same_name(known, &tag.name)) {
            labels.push(tag.name.clone());
        }
        if !known_tags.iter().any(|known| same_name(&known.name, &tag.name)) {
            known_tags.push(tag);
        }
    }

    let draft = NoteDraft {
        title: options.title.clone(),
        body: options.body.clone(),
        color: options.color,
        pinned: options.pin,
        labels: labels.clone(),
        collaborators: options.assignees.clone(),
    };
    tracing::info!(color = %draft.color, pinned = draft.pinned, "creating note");
    let note = store.create_note(&draft)?;

    let mut report = PlacementReport::new(Destination::Notes);
    report.url = non_empty(note.url);
    report.placement.labels = labels;
    report.placement.assignees = draft.collaborators;
    Ok(PlacementOutcome::Placed(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{InMemoryCodeHost, InMemoryNoteStore};
    use crate::color::Color;
    use crate::prompt::ScriptedPrompter;

    fn repo_options(repo: &str) -> InvocationOptions {
        InvocationOptions {
            body: "Make it faster".into(),
            title: Some("Speed".into()),
            repo: Some(repo.into()),
            self_assign: true,
            default_project: Some("{repository}".into()),
            default_column: Some("To Do".into()),
            ..InvocationOptions::default()
        }
    }

    fn seeded_host() -> InMemoryCodeHost {
        InMemoryCodeHost::new("alice")
            .with_repo_project("seeds", "seeds")
            .with_column("seeds", "To Do")
            .with_label("seeds", "enhancement")
    }

    #[test]
    fn card_note_prefixes_the_title() {
        assert_eq!(card_note(Some("T"), "body"), "# T\n\nbody");
        assert_eq!(card_note(None, "body"), "body");
    }

    #[test]
    fn random_label_colors_are_six_hex_digits() {
        for _ in 0..20 {
            let color = random_label_color();
            assert_eq!(color.len(), 6);
            assert!(color.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn issue_is_created_and_put_on_the_board() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.labels = vec!["Enhancement".into()];

        let outcome = {
            let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement, got {messages:?}");
        };

        assert_eq!(report.placement.project.as_deref(), Some("seeds"));
        assert_eq!(report.placement.column.as_deref(), Some("To Do"));
        assert_eq!(report.placement.labels, vec!["enhancement"]);
        assert_eq!(report.issue_number, Some(1));
        assert!(report.url.is_some());

        let issues = host.issues("seeds");
        assert_eq!(issues[0].title, "Speed");
        assert_eq!(issues[0].body, "Make it faster");
        assert_eq!(issues[0].assignees, vec!["alice"]);
        assert!(matches!(host.cards("To Do")[0], CardContent::Issue(_)));
    }

    #[test]
    fn title_defaults_to_body_with_empty_description() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("alice/seeds");
        options.title = None;

        let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
        place_on_code_host(&mut host, &options, &mut resolution).unwrap();

        let issue = &host.issues("alice/seeds")[0];
        assert_eq!(issue.title, "Make it faster");
        assert_eq!(issue.body, "");
        assert_eq!(issue.milestone, None);
    }

    #[test]
    fn missing_label_aborts_after_the_board_is_resolved() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.labels = vec!["enhancement".into(), "nope".into(), "never-checked".into()];

        let outcome = {
            let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        assert_eq!(outcome, PlacementOutcome::Aborted);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("'nope'"));
        assert!(host.mutations.is_empty());
    }

    #[test]
    fn missing_project_is_created_with_a_description() {
        let mut host = InMemoryCodeHost::new("alice");
        let mut prompter = ScriptedPrompter::new()
            .yes()
            .text("Where seeds grow")
            .yes();
        let mut messages = Vec::new();
        let options = repo_options("seeds");

        let mut resolution = Resolution::new(true, &mut prompter, &mut messages);
        let outcome = place_on_code_host(&mut host, &options, &mut resolution).unwrap();
        assert!(matches!(outcome, PlacementOutcome::Placed(_)));
        assert_eq!(
            host.mutations[0],
            Mutation::CreateProject {
                repo: Some(RepoRef::parse("alice/seeds", "alice").unwrap()),
                name: "seeds".into()
            }
        );
        assert!(matches!(host.mutations[1], Mutation::CreateColumn { .. }));
    }

    #[test]
    fn closed_milestone_needs_confirmation() {
        let mut host = seeded_host().with_milestone("seeds", "v1", MilestoneState::Closed);
        let mut prompter = ScriptedPrompter::new().no();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.milestone = Some("V1".into());

        let outcome = {
            let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        assert_eq!(outcome, PlacementOutcome::Aborted);
        assert_eq!(
            prompter.asked,
            vec!["Milestone 'v1' is closed. Assign the issue to it anyway?"]
        );
        assert!(host.issues("seeds").is_empty());
    }

    #[test]
    fn open_milestone_is_attached_by_number() {
        let mut host = seeded_host()
            .with_milestone("seeds", "v1", MilestoneState::Open)
            .with_milestone("seeds", "v2", MilestoneState::Open);
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.milestone = Some("v2".into());

        let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
        place_on_code_host(&mut host, &options, &mut resolution).unwrap();
        assert_eq!(host.issues("seeds")[0].milestone, Some(2));
    }

    #[test]
    fn no_issue_puts_a_note_card() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.no_issue = true;

        let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
        let outcome = place_on_code_host(&mut host, &options, &mut resolution).unwrap();
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(report.issue_number, None);
        assert!(host.issues("seeds").is_empty());
        assert_eq!(
            host.cards("To Do"),
            vec![CardContent::Note("# Speed\n\nMake it faster".into())]
        );
    }

    #[test]
    fn project_without_column_skips_the_board() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.default_column = None;

        let outcome = {
            let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        assert!(matches!(outcome, PlacementOutcome::Placed(_)));
        assert!(host.cards("To Do").is_empty());
        assert_eq!(host.issues("seeds").len(), 1);
        assert!(messages[0].content.contains("No column"));
    }

    #[test]
    fn account_placement_creates_a_note_card() {
        let mut host = InMemoryCodeHost::new("alice")
            .with_user_project("ideas")
            .with_column("ideas", "To Do");
        let mut prompter = ScriptedPrompter::new();
        let mut messages = Vec::new();
        let options = InvocationOptions {
            body: "Learn the cello".into(),
            project: Some("IDEAS".into()),
            default_user_column: Some("To Do".into()),
            ..InvocationOptions::default()
        };

        let mut resolution = Resolution::new(false, &mut prompter, &mut messages);
        let outcome = place_on_code_host(&mut host, &options, &mut resolution).unwrap();
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(report.destination, Destination::Account);
        assert_eq!(
            host.cards("To Do"),
            vec![CardContent::Note("Learn the cello".into())]
        );
    }

    #[test]
    fn notes_placement_resolves_tags_and_creates_the_note() {
        let mut store = InMemoryNoteStore::new().with_tag("Music");
        let mut prompter = ScriptedPrompter::new().yes();
        let mut messages = Vec::new();
        let options = InvocationOptions {
            body: "Learn the cello".into(),
            labels: vec!["music".into(), "hobby".into()],
            color: Color::Teal,
            pin: true,
            ..InvocationOptions::default()
        };

        let mut resolution = Resolution::new(true, &mut prompter, &mut messages);
        let outcome = place_on_note_store(&mut store, &options, &mut resolution).unwrap();
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(report.placement.labels, vec!["Music", "hobby"]);
        let note = &store.notes()[0];
        assert_eq!(note.color, Color::Teal);
        assert!(note.pinned);
        assert_eq!(note.labels, vec!["Music", "hobby"]);
    }

    #[test]
    fn created_label_counts_as_existing_for_later_spellings() {
        let mut host = seeded_host();
        let mut prompter = ScriptedPrompter::new().yes().text("");
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.labels = ["Bug", "bug", "enhancement", "ENHANCEMENT"]
            .map(String::from)
            .to_vec();

        let outcome = {
            let mut resolution = Resolution::new(true, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement, got {messages:?}");
        };

        assert_eq!(
            prompter.asked,
            vec!["Create missing label 'Bug'?", "A short description of your label"]
        );
        let created = host
            .mutations
            .iter()
            .filter(|m| matches!(m, Mutation::CreateLabel { .. }))
            .count();
        assert_eq!(created, 1);
        assert_eq!(report.placement.labels, vec!["Bug", "enhancement"]);
        assert_eq!(host.issues("seeds")[0].labels, vec!["Bug", "enhancement"]);
    }

    #[test]
    fn created_tag_counts_as_existing_for_later_spellings() {
        let mut store = InMemoryNoteStore::new();
        let mut prompter = ScriptedPrompter::new().yes();
        let mut messages = Vec::new();
        let options = InvocationOptions {
            body: "Learn the cello".into(),
            labels: vec!["Music".into(), "music".into()],
            ..InvocationOptions::default()
        };

        let mut resolution = Resolution::new(true, &mut prompter, &mut messages);
        let outcome = place_on_note_store(&mut store, &options, &mut resolution).unwrap();
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(report.placement.labels, vec!["Music"]);
        assert_eq!(store.notes()[0].labels, vec!["Music"]);
        let created = store
            .mutations
            .iter()
            .filter(|m| matches!(m, Mutation::CreateTag { .. }))
            .count();
        assert_eq!(created, 1);
    }

    #[test]
    fn dry_run_sends_nothing_and_has_no_url() {
        let mut host = InMemoryCodeHost::new("alice");
        let mut prompter = ScriptedPrompter::new().yes().text("").yes();
        let mut messages = Vec::new();
        let mut options = repo_options("seeds");
        options.dry_run = true;

        let outcome = {
            let mut resolution = Resolution::new(true, &mut prompter, &mut messages);
            place_on_code_host(&mut host, &options, &mut resolution).unwrap()
        };
        let PlacementOutcome::Placed(report) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(report.url, None);
        assert_eq!(report.planned.len(), 4);
        assert!(host.mutations.is_empty());
        assert!(host.project_names(Some("seeds")).is_empty());
    }
}

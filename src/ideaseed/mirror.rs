//! Local markdown copies of created ideas.
//!
//! An idea is written to `<root>/<owner>/<repo>/<slug>.md`, or directly under
//! `<root>` when it did not go to a repository, with a YAML frontmatter holding
//! everything but the title and body.

use crate::backend::RepoRef;
use crate::color::Color;
use crate::error::Result;
use crate::options::InvocationOptions;
use crate::placement::PlacementReport;
use crate::prompt::Prompter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Idea {
    pub title: Option<String>,
    pub body: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub milestone: Option<String>,
    pub color: Color,
    pub pinned: bool,
    pub project: Option<String>,
    pub column: Option<String>,
    pub url: Option<String>,
    pub repo: Option<RepoRef>,
}

fn is_white(color: &Color) -> bool {
    *color == Color::White
}

fn is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

fn is_false(value: &bool) -> bool {
    !value
}

#[derive(Serialize)]
struct Frontmatter<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    assignees: &'a [String],
    #[serde(skip_serializing_if = "is_white")]
    color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    labels: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

/// Lowercase words joined by dashes.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

impl Idea {
    pub fn from_report(options: &InvocationOptions, report: &PlacementReport) -> Self {
        Self {
            title: options.title.clone(),
            body: options.body.clone(),
            labels: report.placement.labels.clone(),
            assignees: report.placement.assignees.clone(),
            milestone: report.placement.milestone.clone(),
            color: options.color,
            pinned: options.pin,
            project: report.placement.project.clone(),
            column: report.placement.column.clone(),
            url: report.url.clone(),
            repo: report.repo.clone(),
        }
    }

    /// From the title, else the first line of the body.
    pub fn slug(&self) -> String {
        let source = match &self.title {
            Some(title) => title.as_str(),
            None => self.body.lines().next().unwrap_or_default(),
        };
        let slug = slugify(source);
        if slug.is_empty() {
            "idea".to_string()
        } else {
            slug
        }
    }

    pub fn path_in(&self, root: &Path) -> PathBuf {
        let dir = match &self.repo {
            Some(repo) => root.join(&repo.owner).join(&repo.name),
            None => root.to_path_buf(),
        };
        dir.join(format!("{}.md", self.slug()))
    }

    pub fn to_markdown(&self) -> Result<String> {
        let frontmatter = Frontmatter {
            assignees: &self.assignees,
            color: self.color,
            column: self.column.as_deref(),
            labels: &self.labels,
            milestone: self.milestone.as_deref(),
            pinned: self.pinned,
            project: self.project.as_deref(),
            url: self.url.as_deref(),
        };
        let yaml = serde_yaml::to_string(&frontmatter)?;
        let mut markdown = String::from("---\n");
        if yaml.trim() != "{}" {
            markdown.push_str(&yaml);
        }
        markdown.push_str("---\n\n");
        if let Some(title) = &self.title {
            markdown.push_str(&format!("# {title}\n\n"));
        }
        markdown.push_str(&self.body);
        markdown.push('\n');
        Ok(markdown)
    }
}

/// Writes the copy, asking before replacing an existing file.
///
/// Returns where it was written, or `None` when the user kept the old file.
pub fn save(root: &Path, idea: &Idea, prompter: &mut dyn Prompter) -> Result<Option<PathBuf>> {
    let path = idea.path_in(root);
    if path.exists() {
        let shown = path.strip_prefix(root).unwrap_or(&path).display().to_string();
        let question = format!("The local copy {shown} already exists. Overwrite it?");
        if !prompter.confirm(&question, false)? {
            return Ok(None);
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, idea.to_markdown()?)?;
    tracing::debug!(path = %path.display(), "wrote local copy");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use tempfile::tempdir;

    fn idea() -> Idea {
        Idea {
            title: Some("Add Dark Mode".into()),
            body: "Eyes hurt at night".into(),
            labels: vec!["ui".into()],
            repo: Some(RepoRef {
                owner: "alice".into(),
                name: "seeds".into(),
            }),
            ..Idea::default()
        }
    }

    #[test]
    fn slug_comes_from_title_or_first_line() {
        assert_eq!(slugify("Fix Bug #123"), "fix-bug-123");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(idea().slug(), "add-dark-mode");

        let untitled = Idea {
            body: "First line here\nsecond line".into(),
            ..Idea::default()
        };
        assert_eq!(untitled.slug(), "first-line-here");
        let symbols = Idea {
            body: "!!!".into(),
            ..Idea::default()
        };
        assert_eq!(symbols.slug(), "idea");
    }

    #[test]
    fn path_nests_owner_and_repository() {
        let root = Path::new("/ideas");
        assert_eq!(
            idea().path_in(root),
            PathBuf::from("/ideas/alice/seeds/add-dark-mode.md")
        );
        let note = Idea {
            body: "x".into(),
            ..Idea::default()
        };
        assert_eq!(note.path_in(root), PathBuf::from("/ideas/x.md"));
    }

    #[test]
    fn frontmatter_skips_empty_fields_and_white() {
        let markdown = idea().to_markdown().unwrap();
        assert!(markdown.starts_with("---\nlabels:\n- ui\n---\n"));
        assert!(markdown.contains("# Add Dark Mode\n\nEyes hurt at night\n"));
        assert!(!markdown.contains("color"));
        assert!(!markdown.contains("pinned"));

        let colored = Idea {
            color: Color::DarkBlue,
            pinned: true,
            ..idea()
        };
        let markdown = colored.to_markdown().unwrap();
        assert!(markdown.contains("color: darkblue"));
        assert!(markdown.contains("pinned: true"));
    }

    #[test]
    fn existing_copy_is_kept_unless_confirmed() {
        let dir = tempdir().unwrap();
        let mut prompter = ScriptedPrompter::new();
        let path = save(dir.path(), &idea(), &mut prompter).unwrap().unwrap();
        assert!(path.exists());

        fs::write(&path, "old").unwrap();
        let mut prompter = ScriptedPrompter::new().no();
        assert_eq!(save(dir.path(), &idea(), &mut prompter).unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");

        let mut prompter = ScriptedPrompter::new().yes();
        save(dir.path(), &idea(), &mut prompter).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("Dark Mode"));
    }
}

//! Default project and column names from `{placeholder}` templates.

use crate::error::{IdeaseedError, Result};

/// The identity defaults are rendered against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Repository {
        owner: String,
        name: String,
        username: String,
    },
    /// The authenticated user's own boards.
    Account { username: String },
}

impl Scope {
    fn placeholders(&self) -> Vec<(&'static str, String)> {
        match self {
            Scope::Repository {
                owner,
                name,
                username,
            } => vec![
                ("owner", owner.clone()),
                ("repository", name.clone()),
                ("username", username.clone()),
            ],
            Scope::Account { username } => vec![
                ("owner", username.clone()),
                ("username", username.clone()),
            ],
        }
    }
}

/// Substitutes `{name}` with its value. `{{` and `}}` are literal braces.
pub fn render_template(template: &str, values: &[(&str, String)]) -> Result<String> {
    let fail = |reason: String| IdeaseedError::Template {
        template: template.to_string(),
        reason,
    };

    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(fail("unterminated '{'".to_string())),
                    }
                }
                let value = values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value)
                    .ok_or_else(|| {
                        let allowed: Vec<String> =
                            values.iter().map(|(key, _)| format!("{{{key}}}")).collect();
                        fail(format!(
                            "unknown placeholder {{{name}}}, allowed placeholders are {}",
                            allowed.join(", ")
                        ))
                    })?;
                rendered.push_str(value);
            }
            '}' => return Err(fail("unmatched '}'".to_string())),
            c => rendered.push(c),
        }
    }
    Ok(rendered)
}

/// Resolves the project and column to place a card in.
///
/// Explicit values win over templates. Without a project there is no column,
/// whatever the column template says.
pub fn resolve_defaults(
    project: Option<&str>,
    column: Option<&str>,
    project_template: Option<&str>,
    column_template: Option<&str>,
    scope: &Scope,
) -> Result<(Option<String>, Option<String>)> {
    let mut values = scope.placeholders();

    let project = match (project, project_template) {
        (Some(project), _) => Some(project.to_string()),
        (None, Some(template)) => Some(render_template(template, &values)?),
        (None, None) => None,
    };
    let Some(project) = project.filter(|p| !p.is_empty()) else {
        return Ok((None, None));
    };

    values.push(("project", project.clone()));
    let column = match (column, column_template) {
        (Some(column), _) => Some(column.to_string()),
        (None, Some(template)) => Some(render_template(template, &values)?),
        (None, None) => None,
    };

    Ok((Some(project), column.filter(|c| !c.is_empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_scope() -> Scope {
        Scope::Repository {
            owner: "alice".into(),
            name: "seeds".into(),
            username: "alice".into(),
        }
    }

    #[test]
    fn repository_template_renders_the_repository_name() {
        let resolved =
            resolve_defaults(None, None, Some("{repository}"), Some("To Do"), &repo_scope())
                .unwrap();
        assert_eq!(resolved, (Some("seeds".into()), Some("To Do".into())));
    }

    #[test]
    fn column_template_sees_the_project() {
        let resolved = resolve_defaults(
            Some("Board"),
            None,
            None,
            Some("{project} inbox"),
            &repo_scope(),
        )
        .unwrap();
        assert_eq!(resolved.1.as_deref(), Some("Board inbox"));
    }

    #[test]
    fn no_project_means_no_column() {
        let resolved =
            resolve_defaults(None, Some("Doing"), None, Some("To Do"), &repo_scope()).unwrap();
        assert_eq!(resolved, (None, None));
    }

    #[test]
    fn explicit_values_win() {
        let resolved = resolve_defaults(
            Some("P"),
            Some("C"),
            Some("{repository}"),
            Some("To Do"),
            &repo_scope(),
        )
        .unwrap();
        assert_eq!(resolved, (Some("P".into()), Some("C".into())));
    }

    #[test]
    fn account_scope_has_no_repository_placeholder() {
        let scope = Scope::Account {
            username: "alice".into(),
        };
        let err = resolve_defaults(None, None, Some("{repository}"), None, &scope).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("{repository}"));

        let resolved = resolve_defaults(None, None, Some("{owner}'s ideas"), None, &scope).unwrap();
        assert_eq!(resolved.0.as_deref(), Some("alice's ideas"));
    }

    #[test]
    fn project_placeholder_is_only_for_columns() {
        let err =
            resolve_defaults(None, None, Some("{project}"), None, &repo_scope()).unwrap_err();
        assert!(matches!(err, IdeaseedError::Template { .. }));
    }

    #[test]
    fn braces_escape_and_malformed_templates() {
        let values = vec![("owner", "bob".to_string())];
        assert_eq!(render_template("{{{owner}}}", &values).unwrap(), "{bob}");
        assert!(render_template("{owner", &values).is_err());
        assert!(render_template("owner}", &values).is_err());
    }
}

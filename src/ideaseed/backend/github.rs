//! GitHub REST client (v3, classic projects).

use super::{
    Card, CardContent, CodeHost, Column, Issue, IssueDraft, Label, Milestone, Project, RepoRef,
};
use crate::auth::Authenticator;
use crate::error::{IdeaseedError, Result};
use crate::prompt::Prompter;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const SERVICE: &str = "github";

/// Classic projects are only served under their preview media type.
const PROJECTS_MEDIA_TYPE: &str = "application/vnd.github.inertia-preview+json";
const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GithubCredentials {
    Token { token: String },
    Password { username: String, password: String },
}

/// Tries `message` in a JSON error body, falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    body.to_string()
}

/// Maps a failed response to the matching error.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let needs_otp = header("x-github-otp").is_some_and(|v| v.starts_with("required"));
    let rate_limited = header("x-ratelimit-remaining").as_deref() == Some("0");
    let message = extract_error_message(&response.text().unwrap_or_default());

    match status {
        StatusCode::UNAUTHORIZED if needs_otp => Err(IdeaseedError::TwoFactorRequired),
        StatusCode::UNAUTHORIZED => Err(IdeaseedError::Authentication(message)),
        StatusCode::TOO_MANY_REQUESTS => Err(IdeaseedError::RateLimited {
            service: SERVICE.to_string(),
            message,
        }),
        StatusCode::FORBIDDEN if rate_limited => Err(IdeaseedError::RateLimited {
            service: SERVICE.to_string(),
            message,
        }),
        _ => Err(IdeaseedError::Api {
            service: SERVICE.to_string(),
            status: status.as_u16(),
            message,
        }),
    }
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

pub struct GithubClient {
    http: Client,
    base_url: String,
    credentials: GithubCredentials,
    username: String,
}

impl GithubClient {
    /// Connects and fetches the authenticated user, which validates the credentials.
    pub fn connect(base_url: &str, credentials: GithubCredentials) -> Result<Self> {
        let mut client = Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            username: String::new(),
        };
        let user: User = client.get_json("/user")?;
        client.username = user.login;
        tracing::debug!(username = %client.username, "authenticated with github");
        Ok(client)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "github request");
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, PROJECTS_MEDIA_TYPE)
            .header(USER_AGENT, concat!("ideaseed/", env!("CARGO_PKG_VERSION")));
        match &self.credentials {
            GithubCredentials::Token { token } => {
                builder.header("Authorization", format!("token {token}"))
            }
            GithubCredentials::Password { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = check_response(self.request(Method::GET, path).send()?)?;
        Ok(response.json()?)
    }

    /// Follows pages until a short one comes back.
    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        for page in 1.. {
            let batch: Vec<T> =
                self.get_json(&format!("{path}{separator}per_page={PAGE_SIZE}&page={page}"))?;
            let last = batch.len() < PAGE_SIZE;
            items.extend(batch);
            if last {
                break;
            }
        }
        Ok(items)
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = check_response(self.request(Method::POST, path).json(body).send()?)?;
        Ok(response.json()?)
    }
}

impl CodeHost for GithubClient {
    fn username(&self) -> Result<String> {
        Ok(self.username.clone())
    }

    fn repo_projects(&self, repo: &RepoRef) -> Result<Vec<Project>> {
        self.get_all(&format!("/repos/{repo}/projects"))
    }

    fn create_repo_project(
        &mut self,
        repo: &RepoRef,
        name: &str,
        description: &str,
    ) -> Result<Project> {
        self.post_json(
            &format!("/repos/{repo}/projects"),
            &json!({ "name": name, "body": description }),
        )
    }

    fn user_projects(&self) -> Result<Vec<Project>> {
        self.get_all(&format!("/users/{}/projects", self.username))
    }

    fn create_user_project(&mut self, name: &str, description: &str) -> Result<Project> {
        self.post_json(
            "/user/projects",
            &json!({ "name": name, "body": description }),
        )
    }

    fn columns(&self, project: &Project) -> Result<Vec<Column>> {
        self.get_all(&format!("/projects/{}/columns", project.id))
    }

    fn create_column(&mut self, project: &Project, name: &str) -> Result<Column> {
        self.post_json(
            &format!("/projects/{}/columns", project.id),
            &json!({ "name": name }),
        )
    }

    fn labels(&self, repo: &RepoRef) -> Result<Vec<Label>> {
        self.get_all(&format!("/repos/{repo}/labels"))
    }

    fn create_label(&mut self, repo: &RepoRef, label: &Label) -> Result<Label> {
        self.post_json(&format!("/repos/{repo}/labels"), label)
    }

    fn milestones(&self, repo: &RepoRef) -> Result<Vec<Milestone>> {
        self.get_all(&format!("/repos/{repo}/milestones?state=all"))
    }

    fn create_milestone(&mut self, repo: &RepoRef, title: &str) -> Result<Milestone> {
        self.post_json(
            &format!("/repos/{repo}/milestones"),
            &json!({ "title": title }),
        )
    }

    fn create_issue(&mut self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue> {
        self.post_json(&format!("/repos/{repo}/issues"), draft)
    }

    fn create_card(&mut self, column: &Column, content: &CardContent) -> Result<Card> {
        let body = match content {
            CardContent::Issue(id) => json!({ "content_id": id, "content_type": "Issue" }),
            CardContent::Note(note) => json!({ "note": note }),
        };
        self.post_json(&format!("/projects/columns/{}/cards", column.id), &body)
    }
}

pub struct GithubAuthenticator {
    pub base_url: String,
}

impl GithubAuthenticator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Authenticator for GithubAuthenticator {
    type Credentials = GithubCredentials;
    type Session = GithubClient;

    fn service(&self) -> &'static str {
        SERVICE
    }

    fn ask_credentials(
        &self,
        prompter: &mut dyn Prompter,
        token_only: bool,
    ) -> Result<GithubCredentials> {
        let use_password = !token_only
            && prompter.select(
                "Log in to GitHub using",
                &["Personal access token", "Username and password"],
            )? == 1;
        if use_password {
            let username = prompter.text("Username", None)?;
            let password = prompter.password("Password")?;
            return Ok(GithubCredentials::Password { username, password });
        }
        Ok(GithubCredentials::Token {
            token: prompter.password("Personal access token")?,
        })
    }

    fn authenticate(&self, credentials: &GithubCredentials) -> Result<GithubClient> {
        GithubClient::connect(&self.base_url, credentials.clone())
    }
}

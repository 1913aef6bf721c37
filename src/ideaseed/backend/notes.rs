//! GraphQL client for the notes service.

use super::{Note, NoteDraft, NoteLabel, NoteStore};
use crate::auth::Authenticator;
use crate::error::{IdeaseedError, Result};
use crate::prompt::Prompter;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SERVICE: &str = "notes";

const TAGS_QUERY: &str = "query { tags { name } }";
const CREATE_TAG_MUTATION: &str =
    "mutation($name: String!) { createTag(name: $name) { name } }";
const ADD_MUTATION: &str = "mutation($title: String, $project: String, $body: String!, \
     $tags: [String!]!, $color: String!, $pinned: Boolean!, $collaborators: [String!]!) { \
     add(title: $title, project: $project, body: $body, tags: $tags, color: $color, \
     pinned: $pinned, collaborators: $collaborators) { id url } }";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesCredentials {
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct TagsData {
    tags: Vec<NoteLabel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTagData {
    create_tag: NoteLabel,
}

#[derive(Debug, Deserialize)]
struct AddData {
    add: Note,
}

pub struct NotesClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl NotesClient {
    /// Connects and lists tags once, which validates the token.
    pub fn connect(endpoint: &str, credentials: &NotesCredentials) -> Result<Self> {
        let client = Self {
            http: Client::new(),
            endpoint: endpoint.to_string(),
            token: credentials.token.clone(),
        };
        client.tags()?;
        Ok(client)
    }

    fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        tracing::debug!(endpoint = %self.endpoint, "notes request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(USER_AGENT, concat!("ideaseed/", env!("CARGO_PKG_VERSION")))
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    IdeaseedError::Authentication(message)
                }
                StatusCode::TOO_MANY_REQUESTS => IdeaseedError::RateLimited {
                    service: SERVICE.to_string(),
                    message,
                },
                _ => IdeaseedError::Api {
                    service: SERVICE.to_string(),
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: GraphqlResponse<T> = response.json()?;
        unwrap_graphql(body)
    }
}

fn unwrap_graphql<T>(response: GraphqlResponse<T>) -> Result<T> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(IdeaseedError::Api {
            service: SERVICE.to_string(),
            status: 200,
            message: messages.join("; "),
        });
    }
    response.data.ok_or_else(|| IdeaseedError::Api {
        service: SERVICE.to_string(),
        status: 200,
        message: "response has no data".to_string(),
    })
}

impl NoteStore for NotesClient {
    fn tags(&self) -> Result<Vec<NoteLabel>> {
        let data: TagsData = self.execute(TAGS_QUERY, json!({}))?;
        Ok(data.tags)
    }

    fn create_tag(&mut self, name: &str) -> Result<NoteLabel> {
        let data: CreateTagData = self.execute(CREATE_TAG_MUTATION, json!({ "name": name }))?;
        Ok(data.create_tag)
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note> {
        let data: AddData = self.execute(
            ADD_MUTATION,
            json!({
                "title": draft.title,
                "project": Value::Null,
                "body": draft.body,
                "tags": draft.labels,
                "color": draft.color.name(),
                "pinned": draft.pinned,
                "collaborators": draft.collaborators,
            }),
        )?;
        Ok(data.add)
    }
}

pub struct NotesAuthenticator {
    pub endpoint: String,
}

impl NotesAuthenticator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Authenticator for NotesAuthenticator {
    type Credentials = NotesCredentials;
    type Session = NotesClient;

    fn service(&self) -> &'static str {
        SERVICE
    }

    fn ask_credentials(
        &self,
        prompter: &mut dyn Prompter,
        _token_only: bool,
    ) -> Result<NotesCredentials> {
        Ok(NotesCredentials {
            token: prompter.password("Notes API token")?,
        })
    }

    fn authenticate(&self, credentials: &NotesCredentials) -> Result<NotesClient> {
        NotesClient::connect(&self.endpoint, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_become_api_errors() {
        let response: GraphqlResponse<TagsData> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "no"}, {"message": "never"}]}"#,
        )
        .unwrap();
        let err = unwrap_graphql(response).unwrap_err();
        assert!(err.to_string().contains("no; never"));
    }

    #[test]
    fn created_tag_is_read_from_camel_case_field() {
        let response: GraphqlResponse<CreateTagData> =
            serde_json::from_str(r#"{"data": {"createTag": {"name": "ideas"}}}"#).unwrap();
        assert_eq!(unwrap_graphql(response).unwrap().create_tag.name, "ideas");
    }

    #[test]
    fn added_note_has_id_and_url() {
        let response: GraphqlResponse<AddData> = serde_json::from_str(
            r#"{"data": {"add": {"id": "n1", "url": "https://notes.test/#n1"}}}"#,
        )
        .unwrap();
        let note = unwrap_graphql(response).unwrap().add;
        assert_eq!(note.id, "n1");
    }
}

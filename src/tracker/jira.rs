//! Jira REST API v3 client

use super::{FoundIssue, IssueStatus, NewTicket, TrackerClient};
use crate::error::TrackerError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SEARCH_FIELDS: &str = "key,summary,status";
const SEARCH_MAX_RESULTS: &str = "5";
const BODY_PREVIEW_LIMIT: usize = 500;

/// Client for the Jira Cloud REST API
pub struct JiraClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// Creates a client for the given Jira site using basic auth
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::client(e.to_string()))?;

        let credentials = STANDARD.encode(format!("{}:{}", email, api_token));

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", credentials),
        })
    }
}

#[async_trait]
impl TrackerClient for JiraClient {
    async fn search(
        &self,
        project_key: &str,
        summary: &str,
    ) -> Result<Vec<FoundIssue>, TrackerError> {
        let jql = build_search_jql(project_key, summary);
        let url = format!("{}/rest/api/3/search", self.base_url);
        tracing::debug!("searching tracker: {}", jql);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .query(&[
                ("jql", jql.as_str()),
                ("fields", SEARCH_FIELDS),
                ("maxResults", SEARCH_MAX_RESULTS),
            ])
            .send()
            .await
            .map_err(|e| TrackerError::request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TrackerError::request(e.to_string()))?;

        if !status.is_success() {
            return Err(TrackerError::status(status.as_u16(), preview(&body)));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| TrackerError::invalid_response(e.to_string()))?;

        Ok(parsed.issues.into_iter().map(FoundIssue::from).collect())
    }

    async fn create(&self, ticket: &NewTicket) -> Result<String, TrackerError> {
        let url = format!("{}/rest/api/3/issue", self.base_url);
        let payload = build_issue_payload(ticket);
        tracing::debug!("creating ticket: {}", ticket.summary);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| TrackerError::request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TrackerError::request(e.to_string()))?;

        if !status.is_success() {
            return Err(TrackerError::status(status.as_u16(), preview(&body)));
        }

        let created: CreatedIssue =
            serde_json::from_str(&body).map_err(|e| TrackerError::invalid_response(e.to_string()))?;

        if created.key.is_empty() {
            return Err(TrackerError::MissingKey);
        }

        tracing::debug!("created ticket {}", created.key);
        Ok(created.key)
    }
}

/// Builds the JQL for finding tickets about one logical update.
///
/// No status filtering: closed tickets must come back so the caller
/// can decide whether to reuse them instead of filing duplicates.
fn build_search_jql(project_key: &str, summary: &str) -> String {
    let escaped = summary.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "project = \"{}\" AND summary ~ \"{}\" ORDER BY created DESC",
        project_key, escaped
    )
}

fn build_issue_payload(ticket: &NewTicket) -> Value {
    json!({
        "fields": {
            "project": { "key": ticket.project_key },
            "issuetype": { "name": ticket.issue_type },
            "summary": ticket.summary,
            "description": build_description(ticket),
            "priority": { "name": ticket.priority },
            "labels": ticket.labels,
        }
    })
}

/// Builds the ticket description in Atlassian Document Format
fn build_description(ticket: &NewTicket) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [
                    {
                        "type": "text",
                        "text": format!("The {} package ", ticket.ecosystem.name()),
                    },
                    {
                        "type": "text",
                        "text": ticket.package,
                        "marks": [{ "type": "strong" }],
                    },
                    {
                        "type": "text",
                        "text": " is outdated.",
                    },
                ]
            },
            text_paragraph(format!("Current version: {}", ticket.current_version)),
            text_paragraph(format!("Latest version: {}", ticket.latest_version)),
            text_paragraph("Please update the package and test accordingly.".to_string()),
        ]
    })
}

fn text_paragraph(text: String) -> Value {
    json!({
        "type": "paragraph",
        "content": [{ "type": "text", "text": text }]
    })
}

/// Truncates an error body for log-safe reporting
fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LIMIT).collect()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
struct SearchIssue {
    key: String,
    fields: SearchIssueFields,
}

#[derive(Debug, Deserialize)]
struct SearchIssueFields {
    #[serde(default)]
    summary: String,
    status: Option<SearchIssueStatus>,
}

#[derive(Debug, Deserialize)]
struct SearchIssueStatus {
    #[serde(default)]
    name: String,
    #[serde(rename = "statusCategory")]
    status_category: Option<SearchStatusCategory>,
}

#[derive(Debug, Deserialize)]
struct SearchStatusCategory {
    key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    #[serde(default)]
    key: String,
}

impl From<SearchIssue> for FoundIssue {
    fn from(issue: SearchIssue) -> Self {
        let status = issue
            .fields
            .status
            .map(|s| IssueStatus::new(s.name, s.status_category.map(|c| c.key)))
            .unwrap_or_else(|| IssueStatus::new("", None));

        Self {
            key: issue.key,
            summary: issue.fields.summary,
            status,
        }
    }
}

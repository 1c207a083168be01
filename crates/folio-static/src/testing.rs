//! In-memory content store for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use folio_client::{ClientError, ContentSource, GraphqlRequest, GraphqlResponse};
use folio_content::queries::{PORTFOLIO_LIST_QUERY, SKILLS_QUERY};
use serde_json::{json, Value};

/// Answers the three site queries from canned JSON.
pub(crate) struct StubSource {
    skills: Value,
    list_override: Option<Value>,
    summaries: Vec<Value>,
    items: HashMap<String, Value>,
    offline: bool,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self {
            skills: json!({ "data": { "skillsCollection": { "items": [] } } }),
            list_override: None,
            summaries: Vec::new(),
            items: HashMap::new(),
            offline: false,
        }
    }

    /// Add a project named `Project <slug>` with two gallery images.
    pub(crate) fn project(self, slug: &str, order: Option<i64>) -> Self {
        let item = json!({
            "order": order,
            "slug": slug,
            "name": format!("Project {slug}"),
            "description": { "json": { "nodeType": "document", "content": [
                { "nodeType": "paragraph", "content": [
                    { "nodeType": "text", "value": format!("About {slug}"), "marks": [] }
                ] }
            ] } },
            "image": { "url": format!("https://img/{slug}.png") },
            "githubUrl": format!("https://github.com/me/{slug}"),
            "liveUrl": null,
            "relatedSkillsCollection": { "items": [
                { "name": "Rust", "slug": "rust", "image": { "url": "https://img/rust.png" } }
            ] },
            "galleryCollection": { "items": [
                { "title": "One", "fileName": "one.png", "url": format!("https://img/{slug}-1.png") },
                { "title": "Two", "fileName": "two.png", "url": format!("https://img/{slug}-2.png") }
            ] },
            "relatedExperience": null
        });
        self.project_json(slug, order, item)
    }

    /// Add a project with a custom detail payload.
    pub(crate) fn project_json(mut self, slug: &str, order: Option<i64>, item: Value) -> Self {
        self.summaries.push(json!({
            "order": order,
            "slug": slug,
            "name": format!("Project {slug}"),
            "image": { "url": format!("https://img/{slug}.png") }
        }));
        self.items.insert(slug.to_string(), item);
        self
    }

    /// List a slug that the detail query does not return.
    pub(crate) fn phantom(mut self, slug: &str) -> Self {
        self.summaries
            .push(json!({ "order": null, "slug": slug, "name": "Phantom" }));
        self
    }

    pub(crate) fn skills(mut self, items: Value) -> Self {
        self.skills = json!({ "data": { "skillsCollection": { "items": items } } });
        self
    }

    pub(crate) fn skills_response(mut self, body: Value) -> Self {
        self.skills = body;
        self
    }

    pub(crate) fn list_response(mut self, body: Value) -> Self {
        self.list_override = Some(body);
        self
    }

    /// Fail every request at the transport level.
    pub(crate) fn offline(mut self) -> Self {
        self.offline = true;
        self
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, ClientError> {
        if self.offline {
            return Err(ClientError::Status {
                status: 503,
                body: "offline".to_string(),
            });
        }

        let body = if request.query == SKILLS_QUERY {
            self.skills.clone()
        } else if request.query == PORTFOLIO_LIST_QUERY {
            self.list_override.clone().unwrap_or_else(|| {
                json!({ "data": { "portfolioCollection": { "items": self.summaries } } })
            })
        } else {
            let slug = request
                .variables
                .as_ref()
                .and_then(|v| v.get("slug"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let items: Vec<Value> = self.items.get(slug).cloned().into_iter().collect();
            json!({ "data": { "portfolioCollection": { "items": items } } })
        };

        Ok(serde_json::from_value(body)?)
    }
}

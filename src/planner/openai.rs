//! OpenAI-compatible planning client.
//!
//! Sends one chat-completions request per repository and expects the model
//! to answer with a JSON object `{language, install, run}`.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{planning_prompt, PlanRequest, PlanResponse, Planner, PlannerError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// README text beyond this many characters is not sent.
pub const MAX_README_CHARS: usize = 8000;

const SYSTEM_PROMPT: &str = "You read a repository README and decide how to install and run \
the project. Reply with a single JSON object and nothing else: \
{\"language\": string, \"install\": string, \"run\": string}. \
If the README does not say how to run the project, use an empty string for \"run\".";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Plans by asking a chat-completions endpoint.
pub struct OpenAiPlanner {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiPlanner {
    /// Create a planner with default endpoint, model and a 60-second timeout.
    pub fn new(api_key: String) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .user_agent("runthis")
            .build()
            .map_err(|e| PlannerError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        })
    }

    /// Create a planner with the API key read from `var`.
    pub fn from_env(var: &str) -> Result<Self, PlannerError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::new(key.trim().to_string()),
            _ => Err(PlannerError::MissingApiKey {
                var: var.to_string(),
            }),
        }
    }

    /// Point at a different OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Bound each request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the configured model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn user_prompt(request: &PlanRequest<'_>) -> String {
        let readme: String = request.readme.chars().take(MAX_README_CHARS).collect();
        let manifests = if request.dependencies.manifests.is_empty() {
            "none".to_string()
        } else {
            request.dependencies.manifests.join(", ")
        };

        format!(
            "{}.\nRepository: {}\nDetected manifests: {}\n\nREADME:\n{}",
            planning_prompt(&request.repo.name),
            request.repo.name,
            manifests,
            readme
        )
    }
}

/// Pull the JSON object out of a reply, tolerating code fences or prose.
fn parse_reply(content: &str) -> Result<PlanResponse, PlannerError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(PlannerError::undetermined());
    }

    let json = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(PlannerError::InvalidResponse(format!(
                "no JSON object in reply: {}",
                content
            )))
        }
    };

    let plan: PlanResponse = serde_json::from_str(json)
        .map_err(|e| PlannerError::InvalidResponse(e.to_string()))?;

    let run = plan.run.trim();
    if run.is_empty() || run.eq_ignore_ascii_case("unknown") {
        return Err(PlannerError::undetermined());
    }

    Ok(plan)
}

impl Planner for OpenAiPlanner {
    fn name(&self) -> &str {
        "openai"
    }

    fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanResponse, PlannerError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::user_prompt(request),
                },
            ],
            temperature: 0.0,
        };

        tracing::debug!("Asking {} ({}) about {}", url, self.model, request.repo.name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .map_err(|e| PlannerError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlannerError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let reply: ChatResponse = response
            .json()
            .map_err(|e| PlannerError::InvalidResponse(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_reply(&content)
    }
}

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::summary::SummaryClient;
use crate::summary::dto::{ChatCompletionRequest, ChatCompletionResponse};

pub(crate) const NO_RESPONSE_FALLBACK: &str = "No AI response available";

// OpenAISummaryClient posts a single user-role message to a chat-completion
// endpoint and returns the first choice's content. The call blocks the serving
// request for the duration of the round trip and relies on the underlying
// client's default timeouts.
pub(crate) struct OpenAISummaryClient {
    http_client: Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl OpenAISummaryClient {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            http_client: Client::new(),
            api_url: config.summary_api_url.to_string(),
            api_key: config.summary_api_key.to_string(),
            model: config.summary_model.to_string(),
            temperature: config.summary_temperature,
        }
    }

    async fn fetch(&self, prompt: &str) -> LibraryResult<ChatCompletionResponse> {
        let request = ChatCompletionRequest::user_prompt(
            self.model.as_str(), self.temperature, prompt);
        let response = self.http_client
            .post(self.api_url.as_str())
            .bearer_auth(self.api_key.as_str())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<ChatCompletionResponse>().await?)
    }
}

#[async_trait]
impl SummaryClient for OpenAISummaryClient {
    async fn get_summary(&self, prompt: &str) -> String {
        match self.fetch(prompt).await {
            Ok(response) => summary_from_response(&response),
            Err(err) => {
                error!("error calling chat-completion api {:?}", err);
                format!("Error fetching AI summary: {}", err)
            }
        }
    }
}

pub(crate) fn summary_from_response(response: &ChatCompletionResponse) -> String {
    match response.choices.first() {
        Some(choice) => choice.message.content.to_string(),
        None => NO_RESPONSE_FALLBACK.to_string(),
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        LibraryError::runtime(
            format!("chat-completion api {}", err).as_str(),
            err.status().map(|s| s.to_string()))
    }
}

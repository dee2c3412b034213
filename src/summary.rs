pub mod dto;
pub mod factory;
pub mod openai_client;

use async_trait::async_trait;

// SummaryClient requests a generated text summary from an external
// chat-completion service. Implementations absorb every failure and always
// hand back a displayable string, so callers never deal with transport errors.
#[async_trait]
pub(crate) trait SummaryClient: Sync + Send {
    async fn get_summary(&self, prompt: &str) -> String;
}

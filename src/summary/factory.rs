use crate::core::domain::Configuration;
use crate::summary::SummaryClient;
use crate::summary::openai_client::OpenAISummaryClient;

pub(crate) fn create_summary_client(config: &Configuration) -> Box<dyn SummaryClient> {
    Box::new(OpenAISummaryClient::new(config))
}

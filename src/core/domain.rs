use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    // id is assigned by the store on first save
    fn id(&self) -> Option<i64>;
}

// Configuration abstracts config options for the library catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub summary_api_url: String,
    pub summary_api_key: String,
    pub summary_model: String,
    pub summary_temperature: f64,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            summary_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            summary_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            summary_model: "gpt-4o".to_string(),
            summary_temperature: 0.7,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

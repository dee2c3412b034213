use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::summary::SummaryClient;

// BookInsightsCommand is the composite operation: it reads a book from the
// catalog and asks the summary client for a generated summary of it. A missing
// book fails with NotFound before the external service is contacted.
pub(crate) struct BookInsightsCommand {
    catalog_service: Box<dyn CatalogService>,
    summary_client: Box<dyn SummaryClient>,
}

impl BookInsightsCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>,
                      summary_client: Box<dyn SummaryClient>) -> Self {
        Self {
            catalog_service,
            summary_client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookInsightsCommandRequest {
    pub(crate) book_id: i64,
}

impl BookInsightsCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BookInsightsCommandResponse {
    pub book: BookDto,
    #[serde(rename = "aiSummary")]
    pub ai_summary: String,
}

impl BookInsightsCommandResponse {
    pub fn new(book: BookDto, ai_summary: String) -> Self {
        Self {
            book,
            ai_summary,
        }
    }
}

fn build_prompt(book: &BookDto) -> String {
    format!("Summarize the following book:\nTitle: {}\nDescription: {}",
            book.title.as_deref().unwrap_or_default(),
            book.description.as_deref().unwrap_or_default())
}

#[async_trait]
impl Command<BookInsightsCommandRequest, BookInsightsCommandResponse> for BookInsightsCommand {
    async fn execute(&self, req: BookInsightsCommandRequest) -> Result<BookInsightsCommandResponse, CommandError> {
        let book = self.catalog_service.get_book_by_id(req.book_id).await
            .map_err(CommandError::from)?
            .ok_or_else(|| CommandError::NotFound {
                message: format!("book {} not found", req.book_id),
            })?;
        let ai_summary = self.summary_client.get_summary(build_prompt(&book).as_str()).await;
        Ok(BookInsightsCommandResponse::new(book, ai_summary))
    }
}

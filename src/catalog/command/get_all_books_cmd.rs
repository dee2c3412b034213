use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetAllBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetAllBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GetAllBooksCommandRequest {}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetAllBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl GetAllBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<GetAllBooksCommandRequest, GetAllBooksCommandResponse> for GetAllBooksCommand {
    async fn execute(&self, _req: GetAllBooksCommandRequest) -> Result<GetAllBooksCommandResponse, CommandError> {
        self.catalog_service.get_all_books().await
            .map_err(CommandError::from).map(GetAllBooksCommandResponse::new)
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// an absent filter is no filter at all; a present-but-empty string is a
// filter value that matches everything
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchBooksCommandRequest {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) author: Option<String>,
}

impl SearchBooksCommandRequest {
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl SearchBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.catalog_service.search_books(req.title.as_deref(), req.author.as_deref()).await
            .map_err(CommandError::from).map(SearchBooksCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(RepositoryStore::InMemory).await;
                AddBookCommand::new(svc)
            });
        static ref SEARCH_CMD : AsyncOnce<SearchBooksCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(RepositoryStore::InMemory).await;
                SearchBooksCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_search_books_by_title() {
        let add_cmd = ADD_CMD.get().await;
        let search_cmd = SEARCH_CMD.get().await;

        let _ = add_cmd.execute(AddBookCommandRequest::new("test title AAAcmd", "search author"))
            .await.expect("should add book");
        let _ = add_cmd.execute(AddBookCommandRequest::new("test title BBBcmd", "search author"))
            .await.expect("should add book");

        let res = search_cmd.execute(SearchBooksCommandRequest::new(Some("aaacmd"), None))
            .await.expect("should search books");
        assert_eq!(1, res.books.len());
        assert_eq!(Some("test title AAAcmd"), res.books[0].title.as_deref());
    }

    #[tokio::test]
    async fn test_should_run_search_books_by_author() {
        let add_cmd = ADD_CMD.get().await;
        let search_cmd = SEARCH_CMD.get().await;

        let _ = add_cmd.execute(AddBookCommandRequest::new("search title", "author GGGcmd"))
            .await.expect("should add book");

        let res = search_cmd.execute(SearchBooksCommandRequest::new(None, Some("gggcmd")))
            .await.expect("should search books");
        assert_eq!(1, res.books.len());
    }

    #[tokio::test]
    async fn test_should_return_everything_without_filters() {
        let add_cmd = ADD_CMD.get().await;
        let search_cmd = SEARCH_CMD.get().await;

        let added = add_cmd.execute(AddBookCommandRequest::new("search all title", "search all author"))
            .await.expect("should add book");

        let res = search_cmd.execute(SearchBooksCommandRequest::new(None, None))
            .await.expect("should search books");
        assert!(res.books.iter().any(|b| b.book_id == added.book.book_id));
    }
}

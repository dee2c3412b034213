pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn create_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn get_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>>;
    async fn update_book(&self, id: i64, book: &BookDto) -> LibraryResult<BookDto>;
    async fn delete_book(&self, id: i64) -> LibraryResult<()>;
    async fn search_books(&self, title: Option<&str>,
                          author: Option<&str>) -> LibraryResult<Vec<BookDto>>;
}

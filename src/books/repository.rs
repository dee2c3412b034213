pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // case-insensitive substring match against the title
    async fn find_by_title_containing(&self, title: &str) -> LibraryResult<Vec<BookEntity>>;

    // case-insensitive substring match against the author
    async fn find_by_author_containing(&self, author: &str) -> LibraryResult<Vec<BookEntity>>;

    // both substrings must match their respective fields
    async fn find_by_title_and_author_containing(&self, title: &str,
                                                 author: &str) -> LibraryResult<Vec<BookEntity>>;
}

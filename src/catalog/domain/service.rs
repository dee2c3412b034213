use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn create_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let saved = self.book_repository.save(&BookEntity::from(book)).await?;
        Ok(BookDto::from(&saved))
    }

    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let records = self.book_repository.find_all().await?;
        Ok(records.iter().map(BookDto::from).collect())
    }

    async fn get_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>> {
        let record = self.book_repository.find_by_id(id).await?;
        Ok(record.as_ref().map(BookDto::from))
    }

    // full-field replacement of the mutable fields, the id and created_at of
    // the existing record are preserved
    async fn update_book(&self, id: i64, book: &BookDto) -> LibraryResult<BookDto> {
        let mut existing = self.book_repository.find_by_id(id).await?
            .ok_or_else(|| LibraryError::not_found(
                format!("book {} not found", id).as_str()))?;
        existing.title = book.title.clone().unwrap_or_default();
        existing.author = book.author.clone().unwrap_or_default();
        existing.isbn = book.isbn.clone();
        existing.publication_year = book.publication_year;
        existing.description = book.description.clone();
        existing.updated_at = Utc::now().naive_utc();
        let saved = self.book_repository.save(&existing).await?;
        Ok(BookDto::from(&saved))
    }

    async fn delete_book(&self, id: i64) -> LibraryResult<()> {
        self.book_repository.delete_by_id(id).await
    }

    async fn search_books(&self, title: Option<&str>,
                          author: Option<&str>) -> LibraryResult<Vec<BookDto>> {
        let records = match (title, author) {
            (Some(title), Some(author)) => {
                self.book_repository.find_by_title_and_author_containing(title, author).await?
            }
            (Some(title), None) => {
                self.book_repository.find_by_title_containing(title).await?
            }
            (None, Some(author)) => {
                self.book_repository.find_by_author_containing(author).await?
            }
            (None, None) => {
                self.book_repository.find_all().await?
            }
        };
        Ok(records.iter().map(BookDto::from).collect())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: Some(other.title.to_string()),
            author: Some(other.author.to_string()),
            isbn: other.isbn.clone(),
            publication_year: other.publication_year,
            description: other.description.clone(),
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.clone().unwrap_or_default(),
            author: other.author.clone().unwrap_or_default(),
            isbn: other.isbn.clone(),
            publication_year: other.publication_year,
            description: other.description.clone(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::BookDto;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(RepositoryStore::InMemory).await
            });
    }

    #[tokio::test]
    async fn test_should_create_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = BookDto::new("svc create title", "svc create author");
        let saved = catalog_svc.create_book(&book).await.expect("should create book");
        let id = saved.book_id.expect("should assign id");

        let loaded = catalog_svc.get_book_by_id(id).await.expect("should return book");
        assert_eq!(Some("svc create title"), loaded.expect("should exist").title.as_deref());
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let catalog_svc = SUT_SVC.get().await;

        let mut book = BookDto::new("svc update title", "svc update author");
        book.isbn = Some("isbn-before".to_string());
        let saved = catalog_svc.create_book(&book).await.expect("should create book");
        let id = saved.book_id.expect("should assign id");

        let mut changes = BookDto::new("svc updated title", "svc updated author");
        changes.isbn = Some("isbn-after".to_string());
        changes.publication_year = 1999;
        changes.description = Some("updated description".to_string());
        let updated = catalog_svc.update_book(id, &changes).await.expect("should update book");

        assert_eq!(Some(id), updated.book_id);
        assert_eq!(Some("svc updated title"), updated.title.as_deref());
        assert_eq!(Some("svc updated author"), updated.author.as_deref());
        assert_eq!(Some("isbn-after".to_string()), updated.isbn);
        assert_eq!(1999, updated.publication_year);
        assert_eq!(Some("updated description".to_string()), updated.description);
    }

    #[tokio::test]
    async fn test_should_fail_updating_missing_book() {
        let catalog_svc = SUT_SVC.get().await;

        let changes = BookDto::new("svc missing title", "svc missing author");
        let res = catalog_svc.update_book(-5, &changes).await;
        assert!(matches!(res, Err(LibraryError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_delete_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = BookDto::new("svc delete title", "svc delete author");
        let saved = catalog_svc.create_book(&book).await.expect("should create book");
        let id = saved.book_id.expect("should assign id");

        catalog_svc.delete_book(id).await.expect("should delete book");
        let loaded = catalog_svc.get_book_by_id(id).await.expect("should query");
        assert!(loaded.is_none());

        // idempotent at the service level too
        catalog_svc.delete_book(id).await.expect("should delete book again");
    }

    #[tokio::test]
    async fn test_should_search_books_by_title() {
        let catalog_svc = SUT_SVC.get().await;

        let _ = catalog_svc.create_book(&BookDto::new("test title AAAsvc", "svc search author"))
            .await.expect("should create book");
        let _ = catalog_svc.create_book(&BookDto::new("test title BBBsvc", "svc search author"))
            .await.expect("should create book");

        let found = catalog_svc.search_books(Some("aaasvc"), None).await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!(Some("test title AAAsvc"), found[0].title.as_deref());
    }

    #[tokio::test]
    async fn test_should_search_books_by_title_and_author() {
        let catalog_svc = SUT_SVC.get().await;

        let _ = catalog_svc.create_book(&BookDto::new("both DDDsvc", "author EEEsvc"))
            .await.expect("should create book");
        let _ = catalog_svc.create_book(&BookDto::new("both DDDsvc", "author FFFsvc"))
            .await.expect("should create book");

        let found = catalog_svc.search_books(Some("dddsvc"), Some("fffsvc"))
            .await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!(Some("author FFFsvc"), found[0].author.as_deref());
    }

    #[tokio::test]
    async fn test_should_return_all_books_without_filters() {
        let catalog_svc = SUT_SVC.get().await;

        let saved = catalog_svc.create_book(&BookDto::new("svc all title", "svc all author"))
            .await.expect("should create book");
        let id = saved.book_id.expect("should assign id");

        // the store is shared across tests, so assert on this test's own record
        let all = catalog_svc.get_all_books().await.expect("should list books");
        assert!(all.iter().any(|b| b.book_id == Some(id)));
        let searched = catalog_svc.search_books(None, None).await.expect("should search");
        assert!(searched.iter().any(|b| b.book_id == Some(id)));
    }
}

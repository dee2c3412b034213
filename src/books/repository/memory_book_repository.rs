use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

struct MemoryStore {
    next_id: i64,
    books: BTreeMap<i64, BookEntity>,
}

lazy_static! {
    // process-wide store so that per-request repository instances share state
    static ref STORE: Mutex<MemoryStore> = Mutex::new(MemoryStore {
        next_id: 1,
        books: BTreeMap::new(),
    });
}

// MemoryBookRepository keeps the catalog in an in-process map keyed by book id.
// It backs local development and the test suite, where an external DynamoDB
// instance is not available.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {}
    }

    fn matches(entity: &BookEntity, title: Option<&str>, author: Option<&str>) -> bool {
        let title_ok = title.map_or(true, |t| {
            entity.title.to_lowercase().contains(t.to_lowercase().as_str())
        });
        let author_ok = author.map_or(true, |a| {
            entity.author.to_lowercase().contains(a.to_lowercase().as_str())
        });
        title_ok && author_ok
    }

    fn find_matching(&self, title: Option<&str>, author: Option<&str>) -> LibraryResult<Vec<BookEntity>> {
        let store = STORE.lock()
            .map_err(|err| LibraryError::runtime(format!("store lock poisoned {:?}", err).as_str(), None))?;
        Ok(store.books.values()
            .filter(|b| Self::matches(b, title, author))
            .cloned().collect())
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut store = STORE.lock()
            .map_err(|err| LibraryError::runtime(format!("store lock poisoned {:?}", err).as_str(), None))?;
        let mut saved = entity.clone();
        let id = match entity.book_id {
            Some(id) => {
                // never hand out an id below one that is already in use
                if id >= store.next_id {
                    store.next_id = id + 1;
                }
                id
            }
            None => {
                let id = store.next_id;
                store.next_id += 1;
                id
            }
        };
        saved.book_id = Some(id);
        saved.updated_at = Utc::now().naive_utc();
        store.books.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let store = STORE.lock()
            .map_err(|err| LibraryError::runtime(format!("store lock poisoned {:?}", err).as_str(), None))?;
        Ok(store.books.get(&id).cloned())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(None, None)
    }

    async fn delete_by_id(&self, id: i64) -> LibraryResult<()> {
        let mut store = STORE.lock()
            .map_err(|err| LibraryError::runtime(format!("store lock poisoned {:?}", err).as_str(), None))?;
        store.books.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_title_containing(&self, title: &str) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(Some(title), None)
    }

    async fn find_by_author_containing(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(None, Some(author))
    }

    async fn find_by_title_and_author_containing(&self, title: &str,
                                                 author: &str) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(Some(title), Some(author))
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_save_and_assign_id() {
        let repo = MemoryBookRepository::new();
        let saved = repo.save(&BookEntity::new("mem save title", "mem save author"))
            .await.expect("should save book");
        let id = saved.book_id.expect("should assign id");

        let other = repo.save(&BookEntity::new("mem save title 2", "mem save author 2"))
            .await.expect("should save book");
        assert_ne!(Some(id), other.book_id);

        let loaded = repo.find_by_id(id).await.expect("should load book");
        assert_eq!("mem save title", loaded.expect("should exist").title.as_str());
    }

    #[tokio::test]
    async fn test_should_overwrite_existing_id() {
        let repo = MemoryBookRepository::new();
        let mut saved = repo.save(&BookEntity::new("mem overwrite before", "mem author"))
            .await.expect("should save book");
        saved.title = "mem overwrite after".to_string();
        let updated = repo.save(&saved).await.expect("should overwrite book");
        assert_eq!(saved.book_id, updated.book_id);

        let loaded = repo.find_by_id(saved.book_id.unwrap()).await
            .expect("should load book").expect("should exist");
        assert_eq!("mem overwrite after", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_return_none_for_missing_id() {
        let repo = MemoryBookRepository::new();
        let loaded = repo.find_by_id(-42).await.expect("should query");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_should_delete_idempotently() {
        let repo = MemoryBookRepository::new();
        let saved = repo.save(&BookEntity::new("mem delete title", "mem delete author"))
            .await.expect("should save book");
        let id = saved.book_id.unwrap();

        repo.delete_by_id(id).await.expect("should delete book");
        assert!(repo.find_by_id(id).await.expect("should query").is_none());

        // deleting again is a no-op
        repo.delete_by_id(id).await.expect("should delete book again");
    }

    #[tokio::test]
    async fn test_should_search_title_case_insensitively() {
        let repo = MemoryBookRepository::new();
        let _ = repo.save(&BookEntity::new("test title AAAmem", "author one"))
            .await.expect("should save book");
        let _ = repo.save(&BookEntity::new("test title BBBmem", "author two"))
            .await.expect("should save book");

        let found = repo.find_by_title_containing("aaamem").await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!("test title AAAmem", found[0].title.as_str());
    }

    #[tokio::test]
    async fn test_should_search_author_case_insensitively() {
        let repo = MemoryBookRepository::new();
        let _ = repo.save(&BookEntity::new("title one", "Gabriel MEMMarquez"))
            .await.expect("should save book");
        let _ = repo.save(&BookEntity::new("title two", "Jorge MEMBorges"))
            .await.expect("should save book");

        let found = repo.find_by_author_containing("memmarquez").await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!("Gabriel MEMMarquez", found[0].author.as_str());
    }

    #[tokio::test]
    async fn test_should_search_title_and_author_together() {
        let repo = MemoryBookRepository::new();
        let _ = repo.save(&BookEntity::new("combined CCCmem", "author CCCone"))
            .await.expect("should save book");
        let _ = repo.save(&BookEntity::new("combined CCCmem", "author CCCtwo"))
            .await.expect("should save book");

        let found = repo.find_by_title_and_author_containing("cccmem", "ccctwo")
            .await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!("author CCCtwo", found[0].author.as_str());
    }

    #[tokio::test]
    async fn test_should_match_everything_with_empty_substring() {
        let repo = MemoryBookRepository::new();
        let saved = repo.save(&BookEntity::new("empty filter title", "empty filter author"))
            .await.expect("should save book");
        let id = saved.book_id;

        // the store is shared across tests, so assert on this test's own record
        let all = repo.find_all().await.expect("should list");
        assert!(all.iter().any(|b| b.book_id == id));
        let found = repo.find_by_title_containing("").await.expect("should search");
        assert!(found.iter().any(|b| b.book_id == id));
    }
}

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) const MAX_DESCRIPTION_LEN: usize = 10_000;

// BookDto is a data transfer object for the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    #[serde(default)]
    pub book_id: Option<i64>,
    // absent and blank are distinct states, the validation messages differ
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publication_year: i32,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookDto {
    pub fn new(title: &str, author: &str) -> BookDto {
        BookDto {
            book_id: None,
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: None,
            publication_year: 0,
            description: None,
        }
    }

    // field-level validation, invoked before a book reaches the catalog service
    pub fn validate(&self) -> LibraryResult<()> {
        let mut field_errors = HashMap::new();
        match &self.title {
            None => {
                field_errors.insert("title".to_string(), "Title is required".to_string());
            }
            Some(title) if title.is_empty() => {
                field_errors.insert("title".to_string(), "Title cannot be blank".to_string());
            }
            _ => {}
        }
        match &self.author {
            None => {
                field_errors.insert("author".to_string(), "Author is required".to_string());
            }
            Some(author) if author.is_empty() => {
                field_errors.insert("author".to_string(), "Author cannot be blank".to_string());
            }
            _ => {}
        }
        if let Some(isbn) = &self.isbn {
            if isbn.is_empty() {
                field_errors.insert("isbn".to_string(), "ISBN is required".to_string());
            }
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                field_errors.insert("description".to_string(),
                                    "Description must be no more than 10000 characters.".to_string());
            }
        }
        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(LibraryError::validation("invalid book", field_errors))
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> Option<i64> {
        self.book_id
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new("test title", "test author");
        assert_eq!(Some("test title"), book.title.as_deref());
        assert_eq!(Some("test author"), book.author.as_deref());
    }

    #[tokio::test]
    async fn test_should_validate_valid_book() {
        let mut book = BookDto::new("test title", "test author");
        book.isbn = Some("978-0134190440".to_string());
        book.description = Some("a book".to_string());
        assert!(book.validate().is_ok());
    }

    #[tokio::test]
    async fn test_should_fail_validation_without_title() {
        let mut book = BookDto::new("ignored", "test author");
        book.title = None;
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert_eq!("Title is required", field_errors.get("title").unwrap());
                assert!(field_errors.get("author").is_none());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_validation_with_blank_title() {
        let book: BookDto = serde_json::from_value(
            serde_json::json!({"title": "", "author": "test author"}))
            .expect("should deserialize book");
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert_eq!("Title cannot be blank", field_errors.get("title").unwrap());
                assert!(field_errors.get("author").is_none());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_validation_without_author() {
        let mut book = BookDto::new("test title", "ignored");
        book.author = None;
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert_eq!("Author is required", field_errors.get("author").unwrap());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_validation_with_blank_author() {
        let book = BookDto::new("test title", "");
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert_eq!("Author cannot be blank", field_errors.get("author").unwrap());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_validation_with_blank_isbn() {
        let mut book = BookDto::new("test title", "test author");
        book.isbn = Some("".to_string());
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert_eq!("ISBN is required", field_errors.get("isbn").unwrap());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_fail_validation_with_long_description() {
        let mut book = BookDto::new("test title", "test author");
        book.description = Some("x".repeat(10_001));
        let err = book.validate().expect_err("should fail validation");
        match err {
            crate::core::library::LibraryError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("description"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

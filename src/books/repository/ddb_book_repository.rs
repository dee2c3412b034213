use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{parse_date_attribute, parse_number_attribute, parse_string_attribute, string_date};

// The counter item lives in the books table under this reserved key and holds
// the last assigned book id in its `id_seq` attribute. The key must never
// surface as a book: reads of it return nothing, deletes and saves refuse to
// touch it (deleting it would restart the sequence and reuse ids).
const ID_SEQ_KEY: i64 = 0;

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    // atomically bumps the counter item and returns the next unused id
    async fn next_id(&self) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(ID_SEQ_KEY.to_string()))
            .update_expression("ADD id_seq :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        out.attributes()
            .and_then(|attrs| parse_number_attribute("id_seq", attrs))
            .ok_or_else(|| LibraryError::database("failed to allocate next book id", None, false))
    }

    // scan with optional contains() filters; DynamoDB contains() is
    // case-sensitive so matching runs against the lowercased shadow attributes
    async fn scan_matching(&self, title: Option<&str>,
                           author: Option<&str>) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut filter_expr = "book_id <> :id_seq_key".to_string();
        let mut records = vec![];
        let mut exclusive_start_key = None;
        if let Some(title) = title {
            if !title.is_empty() {
                filter_expr.push_str(" AND contains(title_lc, :title)");
            }
        }
        if let Some(author) = author {
            if !author.is_empty() {
                filter_expr.push_str(" AND contains(author_lc, :author)");
            }
        }
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key)
                .filter_expression(filter_expr.as_str())
                .expression_attribute_values(":id_seq_key", AttributeValue::N(ID_SEQ_KEY.to_string()));
            if let Some(title) = title {
                if !title.is_empty() {
                    request = request.expression_attribute_values(
                        ":title", AttributeValue::S(title.to_lowercase()));
                }
            }
            if let Some(author) = author {
                if !author.is_empty() {
                    request = request.expression_attribute_values(
                        ":author", AttributeValue::S(author.to_lowercase()));
                }
            }
            let out = request.send().await.map_err(LibraryError::from)?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(map_to_book));
            }
            exclusive_start_key = out.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }
        records.sort_by_key(|b| b.book_id);
        Ok(records)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        if entity.book_id == Some(ID_SEQ_KEY) {
            return Err(LibraryError::validation(
                "invalid book",
                HashMap::from([("book_id".to_string(),
                                format!("Book id {} is reserved", ID_SEQ_KEY))])));
        }
        let mut saved = entity.clone();
        saved.book_id = match entity.book_id {
            Some(id) => Some(id),
            None => Some(self.next_id().await?),
        };
        saved.updated_at = Utc::now().naive_utc();
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(book_to_item(&saved)))
            .send()
            .await.map(|_| saved).map_err(LibraryError::from)
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        if id == ID_SEQ_KEY {
            return Ok(None);
        }
        self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)
            .map(|out| out.item().map(map_to_book))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan_matching(None, None).await
    }

    async fn delete_by_id(&self, id: i64) -> LibraryResult<()> {
        let table_name: &str = self.table_name.as_ref();
        if id == ID_SEQ_KEY {
            return Ok(());
        }
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .send()
            .await.map(|_| ()).map_err(LibraryError::from)
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_by_title_containing(&self, title: &str) -> LibraryResult<Vec<BookEntity>> {
        self.scan_matching(Some(title), None).await
    }

    async fn find_by_author_containing(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        self.scan_matching(None, Some(author)).await
    }

    async fn find_by_title_and_author_containing(&self, title: &str,
                                                 author: &str) -> LibraryResult<Vec<BookEntity>> {
        self.scan_matching(Some(title), Some(author)).await
    }
}

fn book_to_item(entity: &BookEntity) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        ("book_id".to_string(), AttributeValue::N(entity.book_id.unwrap_or_default().to_string())),
        ("title".to_string(), AttributeValue::S(entity.title.to_string())),
        ("title_lc".to_string(), AttributeValue::S(entity.title.to_lowercase())),
        ("author".to_string(), AttributeValue::S(entity.author.to_string())),
        ("author_lc".to_string(), AttributeValue::S(entity.author.to_lowercase())),
        ("publication_year".to_string(), AttributeValue::N(entity.publication_year.to_string())),
        ("created_at".to_string(), string_date(entity.created_at)),
        ("updated_at".to_string(), string_date(entity.updated_at)),
    ]);
    if let Some(isbn) = &entity.isbn {
        item.insert("isbn".to_string(), AttributeValue::S(isbn.to_string()));
    }
    if let Some(description) = &entity.description {
        item.insert("description".to_string(), AttributeValue::S(description.to_string()));
    }
    item
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        isbn: parse_string_attribute("isbn", map),
        publication_year: parse_number_attribute("publication_year", map).unwrap_or_default() as i32,
        description: parse_string_attribute("description", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
    }
}

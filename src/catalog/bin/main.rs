include!("../../lib.rs");
use std::net::SocketAddr;
use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;
use crate::catalog::controller::{book_insights, create_book, find_book_by_id, get_all_books, remove_book, search_books, update_book};
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::setup_tracing;

#[tokio::main]
async fn main() {
    setup_tracing();

    let store = match std::env::var("BOOKS_REPOSITORY").as_deref() {
        Ok("dynamodb") => RepositoryStore::DynamoDB,
        _ => RepositoryStore::InMemory,
    };
    let state = AppState::new(Configuration::new(), store);

    let app = Router::new()
        .route("/books", post(create_book).get(get_all_books))
        .route("/books/search", get(search_books))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/books/:id/ai-insights", get(book_insights))
        .with_state(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .expect("invalid BIND_ADDR");
    info!("catalog listening on {} with {:?} store", addr, store);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}

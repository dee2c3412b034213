use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(config: Configuration, store: RepositoryStore) -> AppState {
        AppState {
            config,
            store,
        }
    }
}

pub(crate) type ServerError = (StatusCode, Json<Value>);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, Json(json!({"error": format!("{}", err)})))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": format!("{:?}", err)})))
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(json!({"error": format!("{:?}", err)})))
            }
            CommandError::Validation { ref field_errors, .. } => {
                // the body is the field -> message map itself
                (StatusCode::BAD_REQUEST, Json(json!(field_errors)))
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": format!("{:?}", err)})))
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": format!("{:?}", err)})))
            }
        }
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // saves an entity - inserts with a newly assigned id when the id is absent,
    // otherwise overwrites the record with the matching id
    async fn save(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity if it exists
    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // all entities, insertion order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // delete an entity, no-op when absent
    async fn delete_by_id(&self, id: i64) -> LibraryResult<()>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    InMemory,
}

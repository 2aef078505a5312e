use crate::doc::UserDoc;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt user document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence collaborator for user documents.
///
/// The document is written through whole on each save action; partial-update
/// semantics (preferences shallow merge, field patches) are applied to the
/// loaded document before `upsert`. Last write wins across sessions.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The stored document, or `None` for an unknown user.
    async fn fetch(&self, user_id: &str) -> Result<Option<UserDoc>, StoreError>;

    /// Write the full document for this user, creating it if absent.
    async fn upsert(&self, user_id: &str, doc: &UserDoc) -> Result<(), StoreError>;
}

use crate::error::Result;
use crate::models::interview::Interview;
use crate::provider::{Direction, DocumentStore, Query};

/// How many interviews from other users a dashboard render shows at most.
pub const DEFAULT_AVAILABLE_LIMIT: usize = 20;

const INTERVIEWS_COLLECTION: &str = "interviews";

/// Lists every interview owned by `user_id`, most recent first.
///
/// An empty result is an empty vec, not an error.
pub async fn list_owned(store: &dyn DocumentStore, user_id: &str) -> Result<Vec<Interview>> {
    let query = Query::new()
        .where_eq("userId", user_id)
        .order_by("createdAt", Direction::Descending);

    let documents = store.query(INTERVIEWS_COLLECTION, query).await?;
    documents
        .into_iter()
        .map(Interview::from_document)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Lists finalized interviews from other users, most recent first, capped
/// at `limit` (default 20).
///
/// The filter/order shape (equality on `finalized`, inequality on `userId`,
/// order on `createdAt`) needs a composite index on a real backend.
pub async fn list_available(
    store: &dyn DocumentStore,
    user_id: &str,
    limit: Option<usize>,
) -> Result<Vec<Interview>> {
    let query = Query::new()
        .where_eq("finalized", true)
        .where_ne("userId", user_id)
        .order_by("createdAt", Direction::Descending)
        .limit(limit.unwrap_or(DEFAULT_AVAILABLE_LIMIT));

    let documents = store.query(INTERVIEWS_COLLECTION, query).await?;
    documents
        .into_iter()
        .map(Interview::from_document)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

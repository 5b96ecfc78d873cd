use crate::database::MongoDB;
use crate::models::UpsertOutcome;
use crate::utils::error::AppError;
use mongodb::bson::{doc, Document};

/// Upsert a user profile keyed by email. Last write wins: matching profile
/// fields are replaced via $set, the document is created if absent. The email
/// in the filter lands on the stored document on insert.
pub async fn upsert_user(
    db: &MongoDB,
    email: &str,
    profile: Document,
) -> Result<UpsertOutcome, AppError> {
    let collection = db.collection::<Document>("users");

    let result = collection
        .update_one(doc! { "email": email }, doc! { "$set": profile })
        .upsert(true)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(UpsertOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_id: result
            .upserted_id
            .as_ref()
            .and_then(|id| id.as_object_id())
            .map(|oid| oid.to_hex()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_upsert_creates_then_updates() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/taskade-test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let email = "upsert-test@x.com";
        db.collection::<Document>("users")
            .delete_many(doc! { "email": email })
            .await
            .unwrap();

        let first = upsert_user(&db, email, doc! { "displayName": "First" })
            .await
            .unwrap();
        assert_eq!(first.matched_count, 0);
        assert!(first.upserted_id.is_some());

        let second = upsert_user(&db, email, doc! { "displayName": "Second" })
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert!(second.upserted_id.is_none());
    }
}

use serde_json::{Map, Value};

use prepwise_api::provider::local::LocalProvider;
use prepwise_api::provider::{Direction, DocumentStore, IdentityProvider, ProviderError, Query};
use prepwise_api::services::interviews as interview_service;

fn provider() -> LocalProvider {
    LocalProvider::new(vec![7u8; 32])
}

fn interview_fields(user_id: &str, created_at: &str, finalized: bool) -> Map<String, Value> {
    serde_json::json!({
        "userId": user_id,
        "createdAt": created_at,
        "finalized": finalized,
        "role": "Frontend Developer",
        "type": "technical",
    })
    .as_object()
    .unwrap()
    .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn owned_interviews_come_back_newest_first() {
        let store = provider();

        // Inserted out of order on purpose: T3, T1, T2.
        store
            .set("interviews", "i1", interview_fields("u1", "2024-05-03T10:00:00Z", true))
            .await
            .unwrap();
        store
            .set("interviews", "i2", interview_fields("u1", "2024-05-01T10:00:00Z", false))
            .await
            .unwrap();
        store
            .set("interviews", "i3", interview_fields("u1", "2024-05-02T10:00:00Z", true))
            .await
            .unwrap();
        store
            .set("interviews", "i4", interview_fields("u2", "2024-05-04T10:00:00Z", true))
            .await
            .unwrap();

        let interviews = interview_service::list_owned(&store, "u1").await.unwrap();

        let ids: Vec<&str> = interviews.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["i1", "i3", "i2"]);
        assert!(interviews.iter().all(|i| i.user_id == "u1"));
    }

    #[tokio::test]
    async fn owned_interviews_empty_for_unknown_user() {
        let store = provider();

        let interviews = interview_service::list_owned(&store, "nobody").await.unwrap();

        assert!(interviews.is_empty());
    }

    #[tokio::test]
    async fn available_interviews_exclude_own_and_unfinalized_and_cap_at_twenty() {
        let store = provider();

        for n in 0..25 {
            let id = format!("other-{n:02}");
            let created_at = format!("2024-04-{:02}T08:00:00Z", n + 1);
            store
                .set("interviews", &id, interview_fields("u2", &created_at, true))
                .await
                .unwrap();
        }
        store
            .set("interviews", "own", interview_fields("u1", "2024-04-30T08:00:00Z", true))
            .await
            .unwrap();
        store
            .set("interviews", "draft", interview_fields("u3", "2024-04-29T08:00:00Z", false))
            .await
            .unwrap();

        let interviews = interview_service::list_available(&store, "u1", None)
            .await
            .unwrap();

        assert_eq!(interviews.len(), 20);
        assert!(interviews.iter().all(|i| i.finalized));
        assert!(interviews.iter().all(|i| i.user_id != "u1"));
        assert_eq!(interviews[0].id, "other-24");
        for pair in interviews.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn available_interviews_respect_explicit_limit() {
        let store = provider();

        for n in 0..10 {
            let id = format!("i{n}");
            let created_at = format!("2024-04-{:02}T08:00:00Z", n + 1);
            store
                .set("interviews", &id, interview_fields("u2", &created_at, true))
                .await
                .unwrap();
        }

        let interviews = interview_service::list_available(&store, "u1", Some(5))
            .await
            .unwrap();

        assert_eq!(interviews.len(), 5);
    }

    #[tokio::test]
    async fn query_drops_documents_missing_the_order_field() {
        let store = provider();

        store
            .set("interviews", "dated", interview_fields("u2", "2024-04-01T08:00:00Z", true))
            .await
            .unwrap();
        let mut undated = interview_fields("u2", "2024-04-02T08:00:00Z", true);
        undated.remove("createdAt");
        store.set("interviews", "undated", undated).await.unwrap();

        let documents = store
            .query(
                "interviews",
                Query::new().order_by("createdAt", Direction::Descending),
            )
            .await
            .unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "dated");
    }

    #[tokio::test]
    async fn session_cookie_round_trips_its_claims() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let id_token = auth.issue_id_token("u1").unwrap();
        let cookie = auth
            .create_session_cookie(&id_token, chrono::Duration::days(7))
            .await
            .unwrap();
        let claims = auth.verify_session_cookie(&cookie, true).await.unwrap();

        assert_eq!(claims.uid, "u1");
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.expires_at - claims.issued_at, 7 * 86400);
    }

    #[tokio::test]
    async fn expired_session_cookie_fails_verification() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let id_token = auth.issue_id_token("u1").unwrap();
        let cookie = auth
            .create_session_cookie(&id_token, chrono::Duration::seconds(-120))
            .await
            .unwrap();

        let result = auth.verify_session_cookie(&cookie, true).await;
        assert!(matches!(result, Err(ProviderError::SessionExpired)));
    }

    #[tokio::test]
    async fn tampered_session_cookie_fails_verification() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let id_token = auth.issue_id_token("u1").unwrap();
        let cookie = auth
            .create_session_cookie(&id_token, chrono::Duration::days(7))
            .await
            .unwrap();
        let tampered = format!("{}x", cookie);

        let result = auth.verify_session_cookie(&tampered, true).await;
        assert!(matches!(result, Err(ProviderError::InvalidSession)));
    }

    #[tokio::test]
    async fn revoked_session_cookie_fails_only_when_revocation_is_checked() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let id_token = auth.issue_id_token("u1").unwrap();
        let cookie = auth
            .create_session_cookie(&id_token, chrono::Duration::days(7))
            .await
            .unwrap();
        auth.revoke_sessions("u1").await.unwrap();

        let checked = auth.verify_session_cookie(&cookie, true).await;
        assert!(matches!(checked, Err(ProviderError::SessionRevoked)));

        let unchecked = auth.verify_session_cookie(&cookie, false).await;
        assert!(unchecked.is_ok());
    }

    #[tokio::test]
    async fn session_cookie_cannot_stand_in_for_an_id_token() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let id_token = auth.issue_id_token("u1").unwrap();
        let cookie = auth
            .create_session_cookie(&id_token, chrono::Duration::days(7))
            .await
            .unwrap();

        let result = auth
            .create_session_cookie(&cookie, chrono::Duration::days(7))
            .await;
        assert!(matches!(result, Err(ProviderError::InvalidToken)));
    }

    #[tokio::test]
    async fn duplicate_email_registration_is_rejected() {
        let auth = provider();
        auth.register_account("u1", "ann@example.com").unwrap();

        let result = auth.register_account("u2", "ann@example.com");
        assert!(matches!(result, Err(ProviderError::EmailAlreadyExists)));

        let account = auth.get_user_by_email("ann@example.com").await.unwrap();
        assert_eq!(account.unwrap().uid, "u1");
    }
}

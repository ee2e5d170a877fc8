use super::memory::MemoryRepository;
use super::{EvaluationRepository, RepositoryError, RestRepository};
use crate::model::{Evaluation, EvaluationRequest, Metadata};

fn evaluation_for(user_id: &str, response: &str) -> Evaluation {
    let request = EvaluationRequest {
        system_prompt: "s".to_string(),
        user_prompt: "u".to_string(),
        response: response.to_string(),
        evaluator: "dummy".to_string(),
        metadata: Metadata::new(),
        user_id: user_id.to_string(),
        async_mode: false,
    };
    Evaluation::from_parts(&request, Some(0.5), Some("ok".to_string()))
}

#[tokio::test]
async fn test_store_and_get_roundtrip() {
    let repo = MemoryRepository::new();

    let id = repo
        .store_evaluation(evaluation_for("user-1", "hello"))
        .await
        .unwrap();

    let fetched = repo.get_evaluation(&id).await.unwrap().unwrap();
    assert_eq!(fetched.response, "hello");
    assert_eq!(fetched.user_id, "user-1");

    assert!(repo.get_evaluation("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_filters_by_user_and_preserves_order() {
    let repo = MemoryRepository::new();

    for i in 0..5 {
        repo.store_evaluation(evaluation_for("user-1", &format!("r{i}")))
            .await
            .unwrap();
    }
    repo.store_evaluation(evaluation_for("user-2", "other"))
        .await
        .unwrap();

    let all = repo.list_evaluations("user-1", 100, 0).await.unwrap();
    let responses: Vec<&str> = all.iter().map(|e| e.response.as_str()).collect();
    assert_eq!(responses, vec!["r0", "r1", "r2", "r3", "r4"]);

    let page = repo.list_evaluations("user-1", 2, 1).await.unwrap();
    let responses: Vec<&str> = page.iter().map(|e| e.response.as_str()).collect();
    assert_eq!(responses, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_add_user_and_resolve_by_api_key() {
    let repo = MemoryRepository::new();

    let user = repo.add_user("alice").await.unwrap();
    assert_eq!(user.name, "alice");

    let resolved = repo.user_by_api_key(&user.api_key).await.unwrap().unwrap();
    assert_eq!(resolved, user);

    assert!(repo.user_by_api_key("bogus-key").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rest_repository_unreachable_maps_to_error() {
    // Nothing listens on this port; the call must surface as Unreachable,
    // not panic or hang.
    let repo = RestRepository::new("http://127.0.0.1:1", "service-key");

    let err = repo.user_by_api_key("any").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Unreachable { .. }));
}

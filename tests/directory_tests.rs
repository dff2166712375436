// Tests for the in-memory interview directory: filtering, pagination,
// lookup and the session-loader contract.

use interview_live::{InterviewDirectory, ListQuery, SessionLoader};

fn query() -> ListQuery {
    ListQuery::default()
}

#[tokio::test]
async fn test_list_returns_all_samples_by_default() {
    let directory = InterviewDirectory::with_samples();
    let interviews = directory.list(&query()).await;
    assert_eq!(interviews.len(), 3);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let directory = InterviewDirectory::with_samples();

    let completed = directory
        .list(&ListQuery {
            status: Some("completed".to_string()),
            ..query()
        })
        .await;
    assert_eq!(completed.len(), 2);

    // "all" disables the filter
    let all = directory
        .list(&ListQuery {
            status: Some("all".to_string()),
            ..query()
        })
        .await;
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_search_matches_name_and_position_case_insensitively() {
    let directory = InterviewDirectory::with_samples();

    let by_position = directory
        .list(&ListQuery {
            search: Some("FRONTEND".to_string()),
            ..query()
        })
        .await;
    assert_eq!(by_position.len(), 1);
    assert_eq!(by_position[0].candidate_name, "Anna Petrova");

    let by_name = directory
        .list(&ListQuery {
            search: Some("kozlova".to_string()),
            ..query()
        })
        .await;
    assert_eq!(by_name.len(), 1);
}

#[tokio::test]
async fn test_pagination_slices_after_filtering() {
    let directory = InterviewDirectory::with_samples();

    let first = directory
        .list(&ListQuery {
            page: Some(1),
            limit: Some(2),
            ..query()
        })
        .await;
    assert_eq!(first.len(), 2);

    let second = directory
        .list(&ListQuery {
            page: Some(2),
            limit: Some(2),
            ..query()
        })
        .await;
    assert_eq!(second.len(), 1);
    assert_ne!(first[0].id, second[0].id);
}

#[tokio::test]
async fn test_get_unknown_interview_is_none() {
    let directory = InterviewDirectory::with_samples();
    assert!(directory.get("no-such-id").await.is_none());
}

#[tokio::test]
async fn test_loader_contract_errors_on_unknown_session() {
    let directory = InterviewDirectory::new();
    let result = directory.load_session("missing").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_loader_returns_history_for_completed_session() {
    let directory = InterviewDirectory::with_samples();
    let detail = directory.load_session("1").await.unwrap();
    assert!(detail.transcript.is_some());
    assert!(detail.metrics.is_some());
}

#[tokio::test]
async fn test_insert_replaces_existing_by_id() {
    let directory = InterviewDirectory::with_samples();

    let mut detail = directory.get("2").await.unwrap();
    detail.interview.score = Some(99);
    directory.insert(detail).await;

    assert_eq!(directory.get("2").await.unwrap().interview.score, Some(99));
    assert_eq!(directory.list(&query()).await.len(), 3);
}

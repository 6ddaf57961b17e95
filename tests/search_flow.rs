use std::sync::Arc;

use github_user_search::testing::MockUserApi;
use github_user_search::{search, SearchCriteria, SearchError, SearchView, SortMode, UserApi};

fn criteria(identifier: &str) -> SearchCriteria {
    SearchCriteria::new(identifier, "", 0, SortMode::Relevance, 1, 8).expect("valid criteria")
}

#[tokio::test]
async fn test_failed_detail_fetches_are_dropped() {
    let api = Arc::new(
        MockUserApi::new()
            .with_user("alice")
            .with_failing_user("bob", SearchError::NotFound("bob".to_string()))
            .with_user("carol")
            .with_failing_user("dave", SearchError::Unreachable("reset".to_string()))
            .with_user("erin")
            .with_total_count(1200),
    );

    let page = search(Arc::clone(&api), &criteria("a")).await.expect("search");

    let logins: Vec<&str> = page.items.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "carol", "erin"]);
    assert_eq!(page.total_count, 1200);
    assert_eq!(page.total_pages, 150);
    assert_eq!(api.fetch_count(), 5);
}

#[tokio::test]
async fn test_not_found_detail_does_not_surface() {
    let api = Arc::new(
        MockUserApi::new().with_failing_user("ghost", SearchError::NotFound("ghost".to_string())),
    );

    let page = search(api, &criteria("ghost")).await.expect("search");

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_empty_result_set() {
    let api = Arc::new(MockUserApi::new());

    let page = search(Arc::clone(&api), &criteria("octocat")).await.expect("search");

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(api.fetch_count(), 0);
    assert_eq!(api.queries()[0].q, "octocat in:login");
}

#[tokio::test]
async fn test_search_error_aborts_before_fan_out() {
    let api = Arc::new(
        MockUserApi::new()
            .with_user("alice")
            .with_search_error(SearchError::InvalidCriteria("Validation Failed".to_string())),
    );

    let err = search(Arc::clone(&api), &criteria("alice")).await.unwrap_err();

    assert!(matches!(err, SearchError::InvalidCriteria(_)));
    assert_eq!(api.fetch_count(), 0);
}

#[tokio::test]
async fn test_every_summary_is_fetched_once() {
    let logins = ["u1", "u2", "u3", "u4", "u5", "u6", "u7", "u8"];
    let api = logins
        .iter()
        .fold(MockUserApi::new(), |api, login| api.with_user(login));
    let api = Arc::new(api);

    let page = search(Arc::clone(&api), &criteria("u")).await.expect("search");

    assert_eq!(page.items.len(), 8);
    assert_eq!(api.fetch_count(), 8);
    assert_eq!(api.fetched().len(), 8);
    let returned: Vec<&str> = page.items.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(returned, logins);
}

#[tokio::test]
async fn test_extra_summaries_beyond_page_size_are_ignored() {
    let api = (0..10)
        .map(|n| format!("u{n}"))
        .fold(MockUserApi::new(), |api, login| api.with_user(&login));
    let api = Arc::new(api);

    let page = search(Arc::clone(&api), &criteria("u")).await.expect("search");

    assert_eq!(page.items.len(), 8);
    assert_eq!(api.fetch_count(), 8);
    assert!(!api.fetched().contains("u8"));
    assert!(!api.fetched().contains("u9"));
    assert_eq!(page.total_count, 10);
}

#[tokio::test]
async fn test_panicked_and_undecodable_fetches_are_dropped() {
    let api = Arc::new(
        MockUserApi::new()
            .with_user("alice")
            .with_panicking_user("bob")
            .with_failing_user("carol", SearchError::Decode("expected value".to_string()))
            .with_user("dave")
            .with_total_count(40),
    );

    let page = search(Arc::clone(&api), &criteria("a")).await.expect("search");

    let logins: Vec<&str> = page.items.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "dave"]);
    assert_eq!(page.total_count, 40);
    assert_eq!(page.total_pages, 5);
    assert_eq!(api.fetch_count(), 4);
}

#[tokio::test]
async fn test_query_and_sort_reach_the_api() {
    let api = Arc::new(MockUserApi::new());
    let criteria = SearchCriteria::new("", "New York", 3, SortMode::Repositories, 2, 16)
        .expect("valid criteria");

    search(Arc::clone(&api), &criteria).await.expect("search");

    let query = &api.queries()[0];
    assert_eq!(query.q, "location:\"New York\" repos:>=3");
    assert_eq!(query.sort, Some("repositories"));
    assert_eq!(query.page, 2);
    assert_eq!(query.per_page, 16);
}

#[tokio::test]
async fn test_search_through_trait_object() {
    let api: Arc<dyn UserApi> = Arc::new(MockUserApi::new().with_user("alice"));

    let page = search(api, &criteria("alice")).await.expect("search");

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_view_shows_whichever_search_resolves_last() {
    let slow = Arc::new(MockUserApi::new().with_user("slow"));
    let fast = Arc::new(MockUserApi::new().with_user("fast"));
    let slow_criteria = criteria("slow");
    let fast_criteria = criteria("fast");
    let mut view = SearchView::new();

    view.begin();
    let first = search(slow, &slow_criteria);
    view.begin();
    let second = search(fast, &fast_criteria);

    let second = second.await;
    let first = first.await;
    view.apply(second);
    view.apply(first);

    assert_eq!(view.results().items[0].login, "slow");
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_view_resets_on_failure() {
    let ok = Arc::new(MockUserApi::new().with_user("alice"));
    let limited = Arc::new(
        MockUserApi::new().with_search_error(SearchError::RateLimited { reset_at: None }),
    );
    let mut view = SearchView::new();

    view.apply(search(ok, &criteria("alice")).await);
    assert_eq!(view.results().items.len(), 1);

    view.apply(search(limited, &criteria("alice")).await);
    assert!(view.results().items.is_empty());
    assert_eq!(
        view.error(),
        Some("API rate limit exceeded. Please try again later.")
    );
}

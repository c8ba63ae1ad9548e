mod common;

use reelfinder::clients::appwrite::AppwriteClient;
use reelfinder::models::{Movie, NewSearchCounter};
use reelfinder::services::{
    AppwriteCounterStore, CounterStore, SearchTracker, StoreError, TrackOutcome,
};
use serde_json::json;
use std::sync::Arc;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn movie(id: i64, poster: Option<&str>) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        poster_path: poster.map(str::to_string),
        vote_average: 7.0,
        release_date: None,
        original_language: None,
        overview: String::new(),
    }
}

fn store_for(fake: &common::FakeAppwrite) -> Arc<dyn CounterStore> {
    let client = AppwriteClient::new(&fake.endpoint, "proj-1", Some("secret"));
    Arc::new(AppwriteCounterStore::new(client, "db-1", "metrics"))
}

#[tokio::test]
async fn test_create_sends_document_with_public_permissions() {
    let fake = common::spawn_fake_appwrite().await;
    let store = store_for(&fake);

    let counter = store
        .create(NewSearchCounter {
            id: "0123456789abcdef0123".to_string(),
            search_term: "inception".to_string(),
            movie_id: 27205,
            poster_url: "https://image.tmdb.org/t/p/w500/x.jpg".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(counter.id, "0123456789abcdef0123");
    assert_eq!(counter.count, 1);

    let docs = fake.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["searchTerm"], "inception");
    assert_eq!(docs[0]["count"], 1);
    assert_eq!(docs[0]["movie_id"], 27205);
    assert_eq!(docs[0]["poster_url"], "https://image.tmdb.org/t/p/w500/x.jpg");
    assert_eq!(docs[0]["$permissions"], json!([r#"read("any")"#, r#"write("any")"#]));

    let requests = fake.requests();
    assert_eq!(
        requests[0].headers.get("x-appwrite-project").map(String::as_str),
        Some("proj-1")
    );
    assert_eq!(
        requests[0].headers.get("x-appwrite-key").map(String::as_str),
        Some("secret")
    );
}

#[tokio::test]
async fn test_tracker_counts_through_hosted_store() {
    let fake = common::spawn_fake_appwrite().await;
    let tracker = SearchTracker::new(store_for(&fake), IMAGE_BASE, 5);

    let first = tracker
        .record_search("Inception ", &movie(27205, Some("/inception.jpg")))
        .await;
    assert!(matches!(first, TrackOutcome::Created(_)));

    let second = tracker.record_search("inception", &movie(1, None)).await;
    assert!(matches!(second, TrackOutcome::Incremented { count: 2, .. }));

    let docs = fake.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["searchTerm"], "inception");
    assert_eq!(docs[0]["count"], 2);
    assert_eq!(docs[0]["movie_id"], 27205);
    assert_eq!(
        docs[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/inception.jpg"
    );

    let methods: Vec<String> = fake.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "POST", "GET", "PATCH"]);
}

#[tokio::test]
async fn test_trending_ordering_and_limit() {
    let fake = common::spawn_fake_appwrite().await;
    for (id, term, count) in [
        ("id-a", "alien", 3),
        ("id-b", "brazil", 9),
        ("id-c", "casablanca", 1),
        ("id-d", "dune", 9),
        ("id-e", "er", 4),
        ("id-f", "fargo", 2),
        ("id-g", "gattaca", 5),
    ] {
        fake.insert(json!({
            "$id": id,
            "searchTerm": term,
            "count": count,
            "movie_id": 1,
            "poster_url": "",
        }));
    }

    let tracker = SearchTracker::new(store_for(&fake), IMAGE_BASE, 5);
    let trending = tracker.trending().await;

    let terms: Vec<&str> = trending.iter().map(|c| c.search_term.as_str()).collect();
    assert_eq!(terms, vec!["brazil", "dune", "gattaca", "er", "alien"]);
}

#[tokio::test]
async fn test_store_failures_do_not_escape_tracker() {
    let fake = common::spawn_fake_appwrite().await;
    fake.set_failing(true);
    let tracker = SearchTracker::new(store_for(&fake), IMAGE_BASE, 5);

    assert_eq!(
        tracker.record_search("inception", &movie(1, None)).await,
        TrackOutcome::Failed
    );
    assert!(tracker.trending().await.is_empty());
    assert!(fake.documents().is_empty());
}

#[tokio::test]
async fn test_error_status_carries_message() {
    let fake = common::spawn_fake_appwrite().await;
    let store = store_for(&fake);

    let err = store.update_count("missing", 2).await.unwrap_err();
    let message = match err {
        StoreError::Backend(message) => message,
        other => panic!("expected backend error, got {other:?}"),
    };
    assert!(message.contains("404"));
    assert!(message.contains("could not be found"));
}

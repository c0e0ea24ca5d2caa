//! HTTP store client tests against a live local listener.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use movienight_client::{
    ClientError, HttpMovieStore, MemoryKeyValueStore, MovieNight, MovieStore, SubmissionPhase,
};
use movienight_common::{Picks, StoreRequest};
use serde_json::{Value, json};

/// Requests seen by the fake store: `(content type, body)`.
#[derive(Clone, Default)]
struct Received {
    posts: Arc<Mutex<Vec<(String, String)>>>,
}

impl Received {
    fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }
}

async fn query(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("action").map(String::as_str) {
        Some("movies") => Json(json!([
            {
                "id": 1,
                "title": "dune",
                "votes": 2,
                "suggester": "Ana",
                "timestamp": "2025-03-01T20:00:00Z",
                "watchedDate": null,
                "markedBy": null
            },
            {
                "id": 2,
                "title": "Heat",
                "votes": 0,
                "watchedAt": "2025-04-01T00:00:00Z",
                "markedBy": "Sam"
            },
            {"id": 3, "title": "Arrival", "votes": 1}
        ]))
        .into_response(),
        _ => "No action specified".into_response(),
    }
}

async fn submit(State(received): State<Received>, headers: HeaderMap, body: String) -> String {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    received.posts.lock().unwrap().push((content_type, body.clone()));

    let Ok(value) = serde_json::from_str::<Value>(&body) else {
        return "Error: malformed".to_string();
    };
    match value["type"].as_str() {
        Some("suggestion") if value["suggestion"] == "Bad Movie" => {
            "Error: Duplicate title".to_string()
        }
        Some("vote" | "suggestion" | "markWatched" | "unmarkWatched") => "OK".to_string(),
        _ => "Invalid type".to_string(),
    }
}

async fn spawn_store() -> (SocketAddr, Received) {
    let received = Received::default();
    let app = Router::new()
        .route("/", get(query).post(submit))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, received)
}

fn client_for(addr: SocketAddr) -> HttpMovieStore {
    HttpMovieStore::new(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn test_fetch_movies_decodes_wire_records() {
    let (addr, _) = spawn_store().await;

    let movies = client_for(addr).fetch_movies().await.unwrap();

    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].title, "dune");
    assert_eq!(movies[0].suggester.as_deref(), Some("Ana"));
    assert!(movies[0].suggested_at.is_some());
    assert!(!movies[0].is_watched());
    assert!(movies[1].is_watched());
    assert_eq!(movies[1].marked_by.as_deref(), Some("Sam"));
    assert_eq!(movies[2].suggester, None);
}

#[tokio::test]
async fn test_submit_sends_plain_text_json() {
    let (addr, received) = spawn_store().await;

    client_for(addr)
        .submit(&StoreRequest::UnmarkWatched {
            title: "Heat".to_string(),
        })
        .await
        .unwrap();

    let posts = received.posts();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].0.starts_with("text/plain"));
    let body: Value = serde_json::from_str(&posts[0].1).unwrap();
    assert_eq!(body, json!({"type": "unmarkWatched", "title": "Heat"}));
}

#[tokio::test]
async fn test_non_ok_reply_is_rejected() {
    let (addr, _) = spawn_store().await;

    let result = client_for(addr)
        .submit(&StoreRequest::Suggestion {
            name: "Ana".to_string(),
            suggestion: "Bad Movie".to_string(),
        })
        .await;

    match result {
        Err(ClientError::Rejected(body)) => assert_eq!(body, "Error: Duplicate title"),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_store_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(addr).fetch_movies().await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn test_vote_flow_end_to_end() {
    let (addr, received) = spawn_store().await;
    let mut app = MovieNight::start(client_for(addr), MemoryKeyValueStore::new())
        .await
        .unwrap();
    assert_eq!(app.movies().len(), 3);

    app.set_user_name("Ana").await.unwrap();
    app.toggle("dune");
    app.toggle("dune");
    app.toggle("Arrival");
    app.submit_votes().await.unwrap();

    assert_eq!(app.phase(), SubmissionPhase::Succeeded);
    assert_eq!(app.allocation().total_assigned(), 0);

    let posts = received.posts();
    assert_eq!(posts.len(), 1);
    let body: StoreRequest = serde_json::from_str(&posts[0].1).unwrap();
    let mut picks = Picks::new();
    picks.insert("dune".to_string(), 2);
    picks.insert("Arrival".to_string(), 1);
    assert_eq!(
        body,
        StoreRequest::Vote {
            name: "Ana".to_string(),
            picks,
        }
    );
}

#[tokio::test]
async fn test_suggestion_batch_reports_failures() {
    let (addr, received) = spawn_store().await;
    let mut app = MovieNight::start(client_for(addr), MemoryKeyValueStore::new())
        .await
        .unwrap();
    app.set_user_name("Sam").await.unwrap();

    let report = app
        .submit_suggestions("alien, bad movie, the thing")
        .await
        .unwrap();

    assert_eq!(report.accepted, vec!["Alien", "The Thing"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Bad Movie");
    assert_eq!(received.posts().len(), 3);
}

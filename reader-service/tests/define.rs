mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn known_word_returns_first_noun_sense() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/define", json!({"word": "dog"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], false);
    assert_eq!(
        body["definition"],
        "a member of the genus Canis (probably descended from the common wolf) that has been domesticated by man since prehistoric times; occurs in many breeds"
    );
    assert_eq!(body["examples"], json!(["the dog barked all night"]));
}

#[tokio::test]
async fn example_containing_semicolon_is_kept_whole() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/define", json!({"word": "calm"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["definition"], "a state of rest");
    assert_eq!(body["examples"], json!(["the evening was calm; nothing moved"]));
}

#[tokio::test]
async fn input_is_trimmed_and_lowercased() {
    let app = TestApp::spawn().await;

    let (_, plain) = app.post_json("/define", json!({"word": "dog"})).await;
    let (status, shouted) = app.post_json("/define", json!({"word": "  DOG \n"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, shouted);
}

#[tokio::test]
async fn nouns_win_over_verbs() {
    let app = TestApp::spawn().await;

    let (_, body) = app.post_json("/define", json!({"word": "bark"})).await;

    assert_eq!(
        body["definition"],
        "tough protective covering of the woody stems and roots of trees and other woody plants"
    );
    assert_eq!(body["examples"], json!([]));
}

#[tokio::test]
async fn inflected_forms_reduce_to_base() {
    let app = TestApp::spawn().await;

    let (status, plural) = app.post_json("/define", json!({"word": "dogs"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plural["examples"], json!(["the dog barked all night"]));

    let (status, irregular) = app.post_json("/define", json!({"word": "geese"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(irregular["definition"]
        .as_str()
        .unwrap()
        .starts_with("web-footed long-necked"));

    let (status, past) = app.post_json("/define", json!({"word": "ran"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        past["definition"],
        "move fast by using one's feet, with one foot off the ground at any given time"
    );
    assert_eq!(past["examples"], json!(["Don't run--you'll be out of breath"]));
}

#[tokio::test]
async fn adjectives_and_adverbs_are_found() {
    let app = TestApp::spawn().await;

    let (_, adj) = app.post_json("/define", json!({"word": "quick"})).await;
    assert_eq!(adj["definition"], "accomplished rapidly and without delay");
    assert_eq!(adj["examples"], json!(["was quick to make friends"]));

    let (_, adv) = app.post_json("/define", json!({"word": "quickly"})).await;
    assert_eq!(adv["definition"], "with rapid movements");
}

#[tokio::test]
async fn collocations_use_underscores() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/define", json!({"word": "Ice Cream"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["definition"],
        "frozen dessert containing cream and sugar and flavoring"
    );
}

#[tokio::test]
async fn unknown_word_is_not_found() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/define", json!({"word": "zzzxqq123"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["message"], "No definition found for \"zzzxqq123\"");
}

#[tokio::test]
async fn blank_word_is_rejected() {
    let app = TestApp::spawn().await;

    for payload in [json!({"word": "   "}), json!({"word": ""}), json!({})] {
        let (status, body) = app.post_json("/define", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "No word provided");
    }
}

#[tokio::test]
async fn repeated_lookups_are_identical() {
    let app = TestApp::spawn().await;

    let (_, first) = app.post_json("/define", json!({"word": "dog"})).await;
    let (_, second) = app.post_json("/define", json!({"word": "dog"})).await;
    let (_, third) = app.post_json("/define", json!({"word": "dog"})).await;

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn malformed_json_uses_error_schema() {
    let app = TestApp::spawn().await;

    let request = Request::builder()
        .method("POST")
        .uri("/define")
        .header("content-type", "application/json")
        .body(Body::from("{\"word\": "))
        .unwrap();
    let (status, _, bytes) = app.send(request).await;
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["kind"], "bad_request");
}

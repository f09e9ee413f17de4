//! Tests for the authenticated gateway against a local scripted server.

use super::server::{Reply, Server, serve};
use gh_release_tools::github::gateway::{error_message, parse_body, resolve_url};
use gh_release_tools::{
    ApiRequest, GitHubClient, GitHubClientBuilder, GitHubError, ReleaseSelector, list_asset_urls,
    push_asset,
};
use std::time::Duration;

const REPO_URL: &str = "https://api.github.com/repos/tikzit/tikzit";

fn builder(base: &str) -> GitHubClientBuilder {
    let http = reqwest::Client::builder()
        .no_proxy()
        .user_agent("gh-release-tools-tests")
        .build()
        .unwrap();
    GitHubClient::builder()
        .personal_token("secret")
        .repository("tikzit", "tikzit")
        .base_uri(base)
        .http_client(http)
}

fn client(base: &str) -> GitHubClient {
    builder(base).build().unwrap()
}

#[test]
fn test_fragments_join_onto_repo_url() {
    assert_eq!(resolve_url(REPO_URL, "releases"), format!("{REPO_URL}/releases"));
    assert_eq!(
        resolve_url(&format!("{REPO_URL}/"), "/releases/assets/3"),
        format!("{REPO_URL}/releases/assets/3")
    );
    let upload = "https://uploads.github.com/repos/tikzit/tikzit/releases/1/assets?name=a.zip";
    assert_eq!(resolve_url(REPO_URL, upload), upload);
}

#[test]
fn test_parse_body_and_error_message() {
    assert_eq!(parse_body(b"").unwrap(), serde_json::json!({}));
    assert_eq!(parse_body(b" \n").unwrap(), serde_json::json!({}));
    assert_eq!(parse_body(br#"[1]"#).unwrap(), serde_json::json!([1]));
    assert!(matches!(parse_body(b"<html>"), Err(GitHubError::Json(_))));

    assert_eq!(
        error_message(r#"{"message":"Bad credentials","documentation_url":"x"}"#),
        "Bad credentials"
    );
    assert_eq!(error_message("upstream timeout\n"), "upstream timeout");
}

fn releases_json(upload_base: &str) -> String {
    format!(
        r#"[
          {{"id": 1, "name": "v2.0", "tag_name": "v2.0", "draft": false,
            "upload_url": "{upload_base}/uploads/releases/1/assets{{?name,label}}", "assets": []}},
          {{"id": 2, "name": "AUTO", "tag_name": "AUTO", "draft": true,
            "upload_url": "{upload_base}/uploads/releases/2/assets{{?name,label}}",
            "assets": [
              {{"id": 5, "name": "tikzit.dmg", "size": 3,
                "browser_download_url": "https://github.com/tikzit/tikzit/releases/download/AUTO/tikzit.dmg"}}
            ]}}
        ]"#
    )
}

#[tokio::test]
async fn test_list_releases_sends_token_and_parses() {
    let server = Server::bind().await;
    let base = server.base().to_string();
    let handle = server.run(vec![Reply::json(200, &releases_json(&base))]);

    let releases = client(&base).list_releases().join().await.unwrap();
    let seen = handle.await.unwrap();

    assert_eq!(releases.len(), 2);
    assert!(releases[1].draft);
    assert_eq!(releases[1].assets[0].id, 5);

    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].target, "/repos/tikzit/tikzit/releases");
    assert_eq!(seen[0].header("authorization"), Some("token secret"));
    assert_eq!(seen[0].header("accept"), Some("application/vnd.github+json"));
    assert_eq!(seen[0].header("user-agent"), Some("gh-release-tools-tests"));
}

#[tokio::test]
async fn test_empty_body_parses_to_empty_object() {
    let (base, handle) = serve(vec![Reply::empty(200)]).await;

    let value = client(&base)
        .inner()
        .call("releases/assets/9", ApiRequest::get())
        .await
        .unwrap();
    handle.await.unwrap();

    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn test_absolute_url_used_verbatim() {
    let (base, handle) = serve(vec![Reply::json(200, r#"{"ok": true}"#)]).await;

    let value = client(&base)
        .inner()
        .call(&format!("{base}/elsewhere?x=1"), ApiRequest::get())
        .await
        .unwrap();
    let seen = handle.await.unwrap();

    assert_eq!(value["ok"], true);
    assert_eq!(seen[0].target, "/elsewhere?x=1");
    assert_eq!(seen[0].header("authorization"), Some("token secret"));
}

#[tokio::test]
async fn test_error_statuses_are_typed() {
    let (base, handle) = serve(vec![
        Reply::json(404, r#"{"message": "Not Found"}"#),
        Reply::json(401, r#"{"message": "Bad credentials"}"#),
        Reply::json(403, r#"{"message": "API rate limit exceeded"}"#)
            .with_header("x-ratelimit-remaining", "0"),
        Reply::json(422, r#"{"message": "Validation Failed"}"#),
        Reply::json(502, "upstream down"),
    ])
    .await;
    let gh = client(&base);
    let gateway = gh.inner();

    let err = gateway.call("releases", ApiRequest::get()).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");

    let err = gateway.call("releases", ApiRequest::get()).await.unwrap_err();
    assert!(matches!(err, GitHubError::AuthRequired), "{err}");

    let err = gateway.call("releases", ApiRequest::get()).await.unwrap_err();
    assert!(matches!(err, GitHubError::RateLimitExceeded), "{err}");

    let err = gateway.call("releases", ApiRequest::get()).await.unwrap_err();
    match err {
        GitHubError::Status { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = gateway.call("releases", ApiRequest::get()).await.unwrap_err();
    assert!(
        matches!(err, GitHubError::Status { status: 502, ref message } if message == "upstream down"),
        "{err}"
    );

    handle.await.unwrap();
}

#[tokio::test]
async fn test_push_deletes_then_uploads_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("tikzit.dmg");
    std::fs::write(&file, b"new build").unwrap();

    let server = Server::bind().await;
    let base = server.base().to_string();
    let uploaded = r#"{"id": 6, "name": "tikzit.dmg", "size": 9,
        "browser_download_url": "https://github.com/tikzit/tikzit/releases/download/AUTO/tikzit.dmg"}"#;
    let handle = server.run(vec![
        Reply::json(200, &releases_json(&base)),
        Reply::empty(204),
        Reply::json(201, uploaded),
    ]);

    let asset = push_asset(&client(&base), &ReleaseSelector::Draft, &file)
        .await
        .unwrap();
    let seen = handle.await.unwrap();

    assert_eq!(asset.id, 6);
    let calls: Vec<_> = seen
        .iter()
        .map(|r| (r.method.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("GET", "/repos/tikzit/tikzit/releases"),
            ("DELETE", "/repos/tikzit/tikzit/releases/assets/5"),
            ("POST", "/uploads/releases/2/assets?name=tikzit.dmg"),
        ]
    );
    assert_eq!(seen[2].header("content-type"), Some("application/octet-stream"));
    assert_eq!(seen[2].body, b"new build");
}

#[tokio::test]
async fn test_download_streams_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tikzit.dmg");
    std::fs::write(&dest, b"old contents that are longer").unwrap();

    let (base, handle) = serve(vec![Reply::bytes(b"\x00\x01binary")]).await;

    let written = client(&base)
        .download_release_asset(5, &dest)
        .join()
        .await
        .unwrap();
    let seen = handle.await.unwrap();

    assert_eq!(written, 8);
    assert_eq!(std::fs::read(&dest).unwrap(), b"\x00\x01binary");
    assert_eq!(seen[0].target, "/repos/tikzit/tikzit/releases/assets/5");
    assert_eq!(seen[0].header("accept"), Some("application/octet-stream"));
    // only the destination remains; the temporary file was renamed over it
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_failed_download_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tikzit.dmg");
    std::fs::write(&dest, b"previous").unwrap();

    let (base, handle) = serve(vec![Reply::json(404, r#"{"message": "Not Found"}"#)]).await;

    let err = client(&base)
        .download_release_asset(5, &dest)
        .join()
        .await
        .unwrap_err();
    handle.await.unwrap();

    assert!(err.is_not_found());
    assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
}

#[tokio::test]
async fn test_slow_steady_download_outlasts_idle_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tikzit.dmg");

    // six bytes 300 ms apart: about 1.8 s in total, never idle for 1 s
    let (base, handle) =
        serve(vec![Reply::bytes(b"tikzit").trickle(Duration::from_millis(300))]).await;
    let gh = builder(&base)
        .idle_timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let written = gh.download_release_asset(5, &dest).join().await.unwrap();
    handle.await.unwrap();

    assert_eq!(written, 6);
    assert_eq!(std::fs::read(&dest).unwrap(), b"tikzit");
}

#[tokio::test]
async fn test_stalled_download_gives_up_and_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tikzit.dmg");
    std::fs::write(&dest, b"previous").unwrap();

    let (base, _handle) =
        serve(vec![Reply::bytes(b"xy").trickle(Duration::from_millis(1500))]).await;
    let gh = builder(&base)
        .idle_timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let err = gh.download_release_asset(5, &dest).join().await.unwrap_err();

    assert!(matches!(err, GitHubError::Stalled(d) if d == Duration::from_millis(300)), "{err}");
    assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
}

#[tokio::test]
async fn test_slow_json_body_outlasts_idle_timeout() {
    let (base, handle) =
        serve(vec![Reply::json(200, r#"{"id": 1}"#).trickle(Duration::from_millis(150))]).await;
    let gh = builder(&base)
        .idle_timeout(Duration::from_millis(600))
        .build()
        .unwrap();

    let value = gh.inner().call("releases/1", ApiRequest::get()).await.unwrap();
    handle.await.unwrap();

    assert_eq!(value["id"], 1);
}

#[tokio::test]
async fn test_list_urls_through_client() {
    let server = Server::bind().await;
    let base = server.base().to_string();
    let handle = server.run(vec![Reply::json(200, &releases_json(&base))]);

    let urls = list_asset_urls(&client(&base), &ReleaseSelector::Named("AUTO".into()), None, None)
        .await
        .unwrap();
    handle.await.unwrap();

    assert_eq!(
        urls,
        vec!["https://github.com/tikzit/tikzit/releases/download/AUTO/tikzit.dmg"]
    );
}

#[test]
fn test_missing_token_fails_before_any_request() {
    for token in ["", "   "] {
        let err = GitHubClient::builder()
            .personal_token(token)
            .repository("tikzit", "tikzit")
            .base_uri("http://127.0.0.1:9")
            .build()
            .unwrap_err();
        assert!(matches!(err, GitHubError::MissingToken));
    }

    let err = GitHubClient::builder()
        .repository("tikzit", "tikzit")
        .build()
        .unwrap_err();
    assert!(matches!(err, GitHubError::MissingToken));
}

//! End-to-end crawl tests.
//!
//! These tests use wiremock to serve small sites and verify the traversal
//! policy (depth budget, external scoping, revisit suppression) and the
//! shape of the aggregated report. Call-count expectations (`expect(0)` /
//! `expect(1)`) are verified automatically when each mock server drops.

use linkscour::{CrawlConfig, Crawler, Report};
use std::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A 200 response with an HTML body.
fn html(body: impl Into<String>) -> ResponseTemplate {
    // `set_body_raw` rather than `set_body_string` + `insert_header`: the
    // body setter pins the template's mime, which overrides an inserted
    // content-type header when the response is generated.
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

/// Mounts a GET handler for `route`.
async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A URL on a port nothing listens on, so connecting fails immediately.
fn unreachable_url(file: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/{}", port, file)
}

async fn validate(seed: &str) -> Report {
    let crawler = Crawler::new(CrawlConfig::default()).expect("build crawler");
    crawler.validate(seed).await.expect("validate seed")
}

#[tokio::test]
async fn healthy_site_yields_empty_report() {
    let server = MockServer::start().await;

    serve(
        &server,
        "/",
        html(r#"<a href="/a">a</a><a href="/b">b</a>"#),
    )
    .await;
    serve(&server, "/a", html(r#"<a href="/">home</a>"#)).await;
    serve(&server, "/b", html("<p>leaf</p>")).await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty(), "expected empty report, got {:?}", report);
}

#[tokio::test]
async fn aggregates_http_and_transport_failures_by_parent() {
    let server = MockServer::start().await;
    let dead = unreachable_url("gone.html");

    serve(
        &server,
        "/",
        html(format!(
            r#"<a href="/missing">missing</a><a href="{}">dead</a>"#,
            dead
        )),
    )
    .await;
    serve(&server, "/missing", ResponseTemplate::new(404)).await;

    let seed = format!("{}/", server.uri());
    let report = validate(&seed).await;

    assert_eq!(
        report.get(&seed, 404),
        Some(&[format!("{}missing", seed)][..])
    );
    assert_eq!(report.get(&seed, 504), Some(&[dead][..]));
    assert_eq!(report.len(), 2);
}

#[tokio::test]
async fn depth_budget_stops_expansion() {
    let server = MockServer::start().await;

    serve(&server, "/", html(r#"<a href="/level1">1</a>"#)).await;
    serve(&server, "/level1", html(r#"<a href="/level2">2</a>"#)).await;
    serve(&server, "/level2", html(r#"<a href="/level3">3</a>"#)).await;

    // level3 sits at depth 3: fetched, but its links are not expanded.
    Mock::given(method("GET"))
        .and(path("/level3"))
        .respond_with(html(r#"<a href="/level4">4</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    // level4 would be depth 4: never fetched with max_depth = 3.
    Mock::given(method("GET"))
        .and(path("/level4"))
        .respond_with(html("too deep"))
        .expect(0)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn external_links_followed_only_from_seed_page() {
    let server = MockServer::start().await;
    let port = server.address().port();

    // "localhost" resolves to the same server but is a different host than
    // the origin "127.0.0.1", so these links count as external.
    serve(
        &server,
        "/",
        html(format!(r#"<a href="http://localhost:{}/ext1">e1</a>"#, port)),
    )
    .await;

    // External link found on the seed page (depth 0): followed once.
    Mock::given(method("GET"))
        .and(path("/ext1"))
        .respond_with(html(format!(
            r#"<a href="http://localhost:{}/ext2">e2</a>"#,
            port
        )))
        .expect(1)
        .mount(&server)
        .await;

    // External link found beyond the seed page: never followed.
    Mock::given(method("GET"))
        .and(path("/ext2"))
        .respond_with(html("unreached"))
        .expect(0)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn doubly_referenced_page_fetched_once() {
    let server = MockServer::start().await;

    serve(
        &server,
        "/",
        html(r#"<a href="/a">a</a><a href="/b">b</a>"#),
    )
    .await;
    serve(&server, "/a", html(r#"<a href="/shared">s</a>"#)).await;
    serve(&server, "/b", html(r#"<a href="/shared">s</a>"#)).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html("shared"))
        .expect(1)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn fragments_deduplicate_to_one_visit() {
    let server = MockServer::start().await;

    serve(
        &server,
        "/",
        html(r#"<a href="/page#a">a</a><a href="/page#b">b</a>"#),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("page"))
        .expect(1)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn benign_extension_transport_failure_suppressed() {
    let server = MockServer::start().await;
    let dead_video = unreachable_url("intro.flv");

    serve(
        &server,
        "/",
        html(format!(r#"<img src="{}">"#, dead_video)),
    )
    .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty(), "flv failure should be suppressed");
}

#[tokio::test]
async fn commented_out_links_never_fetched() {
    let server = MockServer::start().await;

    serve(
        &server,
        "/",
        html(
            r#"<a href="/visible">v</a>
            <!--
                <a href="/hidden">h</a>
            -->"#,
        ),
    )
    .await;
    serve(&server, "/visible", html("ok")).await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html("hidden"))
        .expect(0)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn non_html_success_is_not_expanded() {
    let server = MockServer::start().await;

    serve(&server, "/", html(r#"<a href="/data">d</a>"#)).await;
    serve(
        &server,
        "/data",
        ResponseTemplate::new(200)
            .set_body_raw(r#"{"link": "href=\"/from-json\""}"#, "application/json"),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/from-json"))
        .respond_with(html("unreached"))
        .expect(0)
        .mount(&server)
        .await;

    let report = validate(&format!("{}/", server.uri())).await;
    assert!(report.is_empty(), "non-HTML 2xx is healthy, just not expanded");
}

#[tokio::test]
async fn error_pages_are_recorded_but_not_expanded() {
    let server = MockServer::start().await;

    serve(&server, "/", html(r#"<a href="/gone">g</a>"#)).await;
    serve(
        &server,
        "/gone",
        ResponseTemplate::new(404).set_body_raw(r#"<a href="/after-error">x</a>"#, "text/html"),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/after-error"))
        .respond_with(html("unreached"))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let report = validate(&seed).await;

    assert_eq!(report.get(&seed, 404), Some(&[format!("{}gone", seed)][..]));
    assert_eq!(report.len(), 1);
}

#[tokio::test]
async fn failures_keyed_by_referring_page() {
    let server = MockServer::start().await;

    serve(&server, "/", html(r#"<a href="/section">s</a>"#)).await;
    serve(&server, "/section", html(r#"<a href="/section/broken">b</a>"#)).await;
    serve(&server, "/section/broken", ResponseTemplate::new(500)).await;

    let seed = format!("{}/", server.uri());
    let report = validate(&seed).await;

    // The 500 is attributed to /section, which referenced it, not the seed.
    let parent = format!("{}section", seed);
    assert_eq!(
        report.get(&parent, 500),
        Some(&[format!("{}section/broken", seed)][..])
    );
    assert_eq!(report.get(&seed, 500), None);
}

#[tokio::test]
async fn zero_depth_checks_only_the_seed() {
    let server = MockServer::start().await;

    serve(&server, "/", html(r#"<a href="/never">n</a>"#)).await;

    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(html("unreached"))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(CrawlConfig::new(0, 5.0)).expect("build crawler");
    let report = crawler
        .validate(&format!("{}/", server.uri()))
        .await
        .expect("validate seed");
    assert!(report.is_empty());
}

#[tokio::test]
async fn fresh_session_per_validate_call() {
    let server = MockServer::start().await;

    // Two runs over the same seed must both fetch it: visited state does
    // not leak across calls.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>home</p>"))
        .expect(2)
        .mount(&server)
        .await;

    let crawler = Crawler::new(CrawlConfig::default()).expect("build crawler");
    let seed = format!("{}/", server.uri());

    assert!(crawler.validate(&seed).await.expect("first run").is_empty());
    assert!(crawler.validate(&seed).await.expect("second run").is_empty());
}

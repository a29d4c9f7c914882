//! Static generation against a mock CMS.

mod common;

use std::fs;

use serde_json::json;
use strapi_press::generator::{GenerateSummary, Generator};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn generate_writes_index_articles_and_not_found() {
    let server = MockServer::start().await;
    common::mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let press = common::press_for(&server, dir.path());
    let generator = Generator::new(&press).unwrap();
    let summary = generator.generate(&press.client().unwrap()).await.unwrap();

    assert_eq!(
        summary,
        GenerateSummary {
            articles: 1,
            skipped: 0,
            diagnostics: 1,
        }
    );

    let index = fs::read_to_string(press.public_dir.join("index.html")).unwrap();
    assert!(index.contains("Mock Blog"));
    assert!(index.contains("Served by a mock"));
    assert!(index.contains(r#"href="/articles/hello-world""#));
    assert!(index.contains("Jan 15, 2024"));

    let article =
        fs::read_to_string(press.public_dir.join("articles/hello-world/index.html")).unwrap();
    assert!(article.contains(
        r#"<div class="prose"><h2>Welcome</h2><p>This is <strong>bold</strong>.</p><ul><li>one</li><li>two</li></ul></div>"#
    ));
    assert!(article.contains(r#"<p>"Stay curious"</p><cite>— Ada</cite>"#));
    assert!(article.contains(&format!(
        r#"<img src="{}/uploads/photo.jpg" alt="A photo" loading="lazy"><figcaption>A photo</figcaption>"#,
        server.uri()
    )));
    assert!(article.contains(r#"data-position="1""#));
    assert!(!article.contains(r#"data-position="2""#));
    assert!(article.contains(r#"data-position="3""#));
    assert!(article.contains("January 15, 2024"));

    let not_found = fs::read_to_string(press.public_dir.join("404.html")).unwrap();
    assert!(not_found.contains("Article Not Found"));
}

#[tokio::test]
async fn generate_fails_when_articles_unavailable() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let press = common::press_for(&server, dir.path());
    let generator = Generator::new(&press).unwrap();

    // Nothing mounted: every request gets a 404 from the mock server
    let result = generator.generate(&press.client().unwrap()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn generate_skips_article_that_fails_to_load() {
    let server = MockServer::start().await;

    let mut broken = common::hello_article();
    broken["title"] = json!("Broken");
    broken["slug"] = json!("broken");

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param_is_missing("filters[slug][$eq]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [broken, common::hello_article()]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "hello-world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [common::hello_article()]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let press = common::press_for(&server, dir.path());
    let generator = Generator::new(&press).unwrap();
    let summary = generator.generate(&press.client().unwrap()).await.unwrap();

    assert_eq!(summary.articles, 1);
    assert_eq!(summary.skipped, 1);
    assert!(press
        .public_dir
        .join("articles/hello-world/index.html")
        .exists());
    assert!(!press.public_dir.join("articles/broken").exists());
    assert!(press.public_dir.join("index.html").exists());
}

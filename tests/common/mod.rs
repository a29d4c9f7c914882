//! Shared fixtures for tests that need a mock CMS.

#![allow(dead_code)]

use serde_json::json;
use strapi_press::config::SiteConfig;
use strapi_press::Press;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn press_for(server: &MockServer, base_dir: &std::path::Path) -> Press {
    let config = SiteConfig {
        api_url: server.uri(),
        request_timeout_secs: 5,
        ..SiteConfig::default()
    };
    Press::with_config(base_dir, config)
}

pub fn hello_article() -> serde_json::Value {
    json!({
        "id": 1,
        "title": "Hello World",
        "slug": "hello-world",
        "description": "A first post",
        "cover": { "url": "/uploads/cover.jpg" },
        "author": { "name": "Sam" },
        "category": { "name": "news" },
        "publishedAt": "2024-01-15T10:30:00.000Z",
        "blocks": [
            { "__component": "shared.rich-text", "body": "## Welcome\nThis is **bold**.\n\n- one\n- two" },
            { "__component": "shared.quote", "body": "Stay curious", "title": "Ada" },
            { "__component": "shared.media", "file": { "url": "/uploads/photo.jpg", "caption": "A photo" } },
            { "__component": "shared.slider", "files": [{ "url": "/a.png" }, { "url": "" }, { "url": "/c.png" }] },
            { "__component": "shared.unsupported" }
        ]
    })
}

/// Mount a CMS with a global entry and a single article
pub async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "siteName": "Mock Blog", "siteDescription": "Served by a mock" }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param_is_missing("filters[slug][$eq]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [hello_article()]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "hello-world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [hello_article()]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(server)
        .await;
}

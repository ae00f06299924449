//! End-to-end error page tests against the bundled registry and pages.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_exact_page_with_default_format() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Code", "404")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
    assert_eq!(res.text().await.unwrap(), common::page("404.html"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_class_wildcard_page() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Code", "503")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.text().await.unwrap(), common::page("5xx.html"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_no_page_is_bare_404() {
    let server = common::start_server(common::bundled_config()).await;
    let client = common::client();

    for (code, format) in [("418", "application/json"), ("302", "text/html")] {
        let res = client
            .get(server.url("/"))
            .header("X-Code", code)
            .header("X-Format", format)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "code {code}");
        assert!(res.headers().get(CONTENT_TYPE).is_none());
        assert!(res.text().await.unwrap().is_empty());
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_requested_json_format() {
    let server = common::start_server(common::bundled_config()).await;
    let client = common::client();

    let res = client
        .get(server.url("/api/orders"))
        .header("X-Code", "404")
        .header("X-Format", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(res.text().await.unwrap(), common::page("404.json"));

    let res = client
        .get(server.url("/api/orders"))
        .header("X-Code", "500")
        .header("X-Format", "application/problem+json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/problem+json");
    assert_eq!(res.text().await.unwrap(), common::page("5xx.json"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_format_reports_default() {
    let server = common::start_server(common::bundled_config()).await;
    let client = common::client();

    for format in ["image/png", "definitely not a media type"] {
        let res = client
            .get(server.url("/"))
            .header("X-Code", "502")
            .header("X-Format", format)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(res.text().await.unwrap(), common::page("5xx.html"));
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_htm_extension_alias() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Code", "404")
        .header("X-Format", "application/xhtml+xml")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()[CONTENT_TYPE], "application/xhtml+xml");
    assert_eq!(res.text().await.unwrap(), common::page("404.html"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unparseable_code_is_404() {
    let server = common::start_server(common::bundled_config()).await;
    let client = common::client();

    for code in [None, Some("abc"), Some("5O3")] {
        let mut req = client.get(server.url("/"));
        if let Some(code) = code {
            req = req.header("X-Code", code);
        }
        let res = req.send().await.unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.text().await.unwrap(), common::page("404.html"));
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_status_code_mapping() {
    let mut config = common::bundled_config();
    config.responses.status_code_mapping = "494:400,529:503".to_string();
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/"))
        .header("X-Code", "494")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), common::page("4xx.html"));

    let res = client
        .get(server.url("/"))
        .header("X-Code", "529")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.text().await.unwrap(), common::page("5xx.html"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_debug_headers_echoed() {
    let mut config = common::bundled_config();
    config.debug = true;
    let server = common::start_server(config).await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Code", "503")
        .header("X-Original-URI", "/checkout")
        .header("X-Namespace", "shop")
        .header("X-Ingress-Name", "storefront")
        .header("X-Service-Name", "checkout")
        .header("X-Service-Port", "8080")
        .header("X-Request-ID", "0f1e2d3c")
        .send()
        .await
        .unwrap();

    let headers = res.headers();
    assert_eq!(headers["x-code"], "503");
    assert_eq!(headers["x-original-uri"], "/checkout");
    assert_eq!(headers["x-namespace"], "shop");
    assert_eq!(headers["x-ingress-name"], "storefront");
    assert_eq!(headers["x-service-name"], "checkout");
    assert_eq!(headers["x-service-port"], "8080");
    assert_eq!(headers["x-request-id"], "0f1e2d3c");
    assert_eq!(headers["x-format"], "");
    assert_eq!(headers[CONTENT_TYPE], "text/html");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_debug_headers_hidden_by_default() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client()
        .get(server.url("/"))
        .header("X-Code", "503")
        .header("X-Namespace", "shop")
        .send()
        .await
        .unwrap();

    assert!(res.headers().get("x-namespace").is_none());
    assert!(res.headers().get("x-code").is_none());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client()
        .get(server.url("/healthz"))
        .header("X-Code", "503")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().is_empty());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = common::start_server(common::bundled_config()).await;

    let res = common::client().get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

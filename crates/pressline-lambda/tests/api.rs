use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use axum::response::IntoResponse;
use lopdf::content::Content;
use lopdf::{Document, Object};
use pressline_export::error::ExportError;
use pressline_lambda::config::{ServiceConfig, DEFAULT_ROUTE};
use pressline_lambda::error::ApiError;
use pressline_lambda::middleware::cors;
use pressline_lambda::state::AppState;

fn router() -> Router {
    pressline_lambda::app(AppState::new(ServiceConfig::default()))
}

async fn send(app: Router, method: Method, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(DEFAULT_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post_json(app: Router, body: Value) -> Response {
    send(app, Method::POST, body.to_string()).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
    response.headers().get(name).unwrap().to_str().unwrap()
}

fn assert_cors(response: &Response) {
    assert_eq!(
        header_str(response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        "true"
    );
    assert_eq!(header_str(response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert_eq!(
        header_str(response, header::ACCESS_CONTROL_ALLOW_METHODS),
        "GET,OPTIONS,PATCH,DELETE,POST,PUT"
    );
    assert_eq!(
        header_str(response, header::ACCESS_CONTROL_ALLOW_HEADERS),
        cors::ALLOW_HEADERS
    );
}

fn filename(response: &Response) -> String {
    let disposition = header_str(response, header::CONTENT_DISPOSITION);
    let name = disposition
        .strip_prefix("attachment; filename=\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap();
    name.to_string()
}

#[tokio::test]
async fn preflight_is_empty_with_cors_headers() {
    let response = send(router(), Method::OPTIONS, "{\"ignored\":true}").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn renders_a_pdf() {
    let response = post_json(router(), json!({ "title": "Report", "content": "Hello world" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(header_str(&response, header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        header_str(&response, header::CACHE_CONTROL),
        "no-cache, no-store, must-revalidate"
    );

    let name = filename(&response);
    let millis = name
        .strip_prefix("document-")
        .and_then(|rest| rest.strip_suffix(".pdf"))
        .unwrap();
    assert!(millis.parse::<i64>().unwrap() > 0);

    let length: usize = header_str(&response, header::CONTENT_LENGTH).parse().unwrap();
    let body = body_bytes(response).await;
    assert_eq!(length, body.len());
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn accepts_all_options() {
    let response = post_json(
        router(),
        json!({
            "title": "Minutes",
            "content": "Line one\nLine two",
            "author": "Ada",
            "fontSize": 16,
            "color": "336699"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    for body in [
        json!({ "content": "x" }),
        json!({ "title": "t" }),
        json!({}),
        json!({ "title": "", "content": "x" }),
        json!({ "title": "t", "content": "" }),
    ] {
        let response = post_json(router(), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(text, r#"{"error":"Title and content are required"}"#);
    }
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE, Method::HEAD] {
        let response = send(router(), method.clone(), Body::empty()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(&response);
        if method != Method::HEAD {
            assert_eq!(body_json(response).await, json!({ "error": "Method not allowed" }));
        }
    }
}

#[tokio::test]
async fn malformed_body_reports_details() {
    let response = send(router(), Method::POST, "{\"title\": ").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate PDF");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_font_size_is_a_malformed_body() {
    let response = post_json(
        router(),
        json!({ "title": "t", "content": "c", "fontSize": "large" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to generate PDF");
}

#[tokio::test]
async fn invalid_options_are_rejected() {
    let response = post_json(router(), json!({ "title": "t", "content": "c", "color": "blue" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "color must be a 3 or 6 digit hex value" })
    );

    for size in [json!(-1), json!(1e-50), json!(0.5), json!(401)] {
        let response = post_json(
            router(),
            json!({ "title": "t", "content": "c", "fontSize": size }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{size}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "fontSize must be a number between 1 and 400" })
        );
    }
}

#[tokio::test]
async fn render_failure_is_reported() {
    let response = ApiError::from(ExportError::Pdf("bad xref".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "PDF generation failed" }));

    let response = ApiError::from(ExportError::Interrupted).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn largest_font_renders_every_page() {
    let response = post_json(
        router(),
        json!({ "title": "T", "content": "a ".repeat(600), "fontSize": 400 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let length: usize = header_str(&response, header::CONTENT_LENGTH).parse().unwrap();
    let body = body_bytes(response).await;
    assert_eq!(length, body.len());
    assert!(Document::load_mem(&body).unwrap().get_pages().len() >= 600);
}

#[tokio::test]
async fn requested_size_and_color_reach_the_body_text() {
    let response = post_json(
        router(),
        json!({ "title": "Report", "content": "Hello world", "fontSize": 16, "color": "#336699" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;

    let doc = Document::load_mem(&body).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

    let number = |obj: &Object| obj.as_float().unwrap();
    let (mut size, mut fill) = (0.0, Vec::new());
    let mut body_style = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => size = number(&op.operands[1]),
            "rg" => fill = op.operands.iter().map(number).collect::<Vec<f32>>(),
            "Tj" if op.operands.first()
                == Some(&Object::string_literal("Hello world")) =>
            {
                body_style = Some((size, fill.clone()));
            }
            _ => {}
        }
    }

    let (size, fill) = body_style.unwrap();
    assert!((size - 16.0).abs() < 0.01);
    let expected = [0x33, 0x66, 0x99].map(|c| c as f32 / 255.0);
    assert_eq!(fill.len(), 3);
    for (channel, want) in fill.iter().zip(expected) {
        assert!((channel - want).abs() < 0.01, "{fill:?}");
    }
}

#[tokio::test]
async fn resubmission_renders_again() {
    let payload = json!({ "title": "Report", "content": "Hello world" });
    let app = router();

    let first = post_json(app.clone(), payload.clone()).await;
    let second = post_json(app, payload).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let stamp = |name: String| -> i64 {
        name.trim_start_matches("document-")
            .trim_end_matches(".pdf")
            .parse()
            .unwrap()
    };
    assert!(stamp(filename(&second)) >= stamp(filename(&first)));
    assert!(!body_bytes(second).await.is_empty());
}

#[tokio::test]
async fn author_line_changes_the_document() {
    let without = post_json(router(), json!({ "title": "Report", "content": "Hello world" })).await;
    let with = post_json(
        router(),
        json!({ "title": "Report", "content": "Hello world", "author": "Ada Lovelace" }),
    )
    .await;
    assert_ne!(body_bytes(without).await.len(), body_bytes(with).await.len());
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

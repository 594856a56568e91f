#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use lending_report::{Server, test_utils::TestServerBuilder};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "lending-report-test-boundary";

/// Server plus its router, backed by a fresh in-memory database
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();
        Self { server, app }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send_json(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send_json(request).await
    }

    /// POST `body` with an optional content type
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send_json(request).await
    }

    /// POST plain text fields as `multipart/form-data`
    pub async fn post_multipart(&self, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        self.send_json(multipart_request(uri, body.into_bytes())).await
    }

    /// Upload `content` as a multipart file field named `field`
    pub async fn upload(&self, field: &str, content: &str) -> (StatusCode, Value) {
        self.upload_file(field, "plans.csv", "text/csv", content.as_bytes())
            .await
    }

    /// Upload raw file bytes with the given name and media type
    pub async fn upload_file(
        &self,
        field: &str,
        file_name: &str,
        media_type: &str,
        content: &[u8],
    ) -> (StatusCode, Value) {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {media_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        self.send_json(multipart_request("/upload", body)).await
    }
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

//! Shared helpers for the API integration tests.
//!
//! Every test builds the full router (middleware included) over a fresh
//! temporary work directory and drives it with `tower::ServiceExt::oneshot`,
//! so no port is ever bound.

// Not every test binary touches every helper
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use catalog_server::{Config, ServerState, api};
use http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const BOUNDARY: &str = "------------------------catalogtest";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
    // Removes the work dir on drop
    _work_dir: tempfile::TempDir,
}

pub fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("temp work dir");
    let config = Config::with_overrides(work_dir.path().display().to_string(), 4000);
    let state = ServerState::initialize(&config).expect("state init");
    let router = api::build_app(&state).with_state(state.clone());

    TestApp {
        state,
        router,
        _work_dir: work_dir,
    }
}

impl TestApp {
    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Register an account and return its bearer token. The first account
    /// registered against a fresh app is the admin.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let res = self
            .post_json(
                "/register",
                serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        body["token"].as_str().expect("token").to_string()
    }
}

pub async fn json_body(res: Response<Body>) -> serde_json::Value {
    let bytes = res.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Hand-built multipart/form-data body with at most one image part
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let images: Vec<_> = image.into_iter().collect();
    multipart_body_with_images(fields, &images)
}

/// Hand-built multipart/form-data body; every image lands in an `image` part
pub fn multipart_body_with_images(
    fields: &[(&str, &str)],
    images: &[(&str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (filename, data) in images {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Vec<u8>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// Minimal 1x1 PNG generated through the image crate
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(1, 1, image::Rgb([120, 80, 40]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("png encode");
    bytes.into_inner()
}

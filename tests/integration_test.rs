use image::{ImageFormat, Rgba, RgbaImage};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::io::Cursor;
use std::process::{Child, Command};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

// Use atomic counter to give each test a unique port
static PORT_COUNTER: AtomicU16 = AtomicU16::new(9500);

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct InfoResponse {
    version: String,
    ocr_engine: Option<String>,
    max_file_size_bytes: usize,
    default_preset: String,
    detectable_languages: usize,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    language: String,
    score: u32,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    language: String,
    name: String,
    score: u32,
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    tag: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: String,
}

struct TestServer {
    child: Child,
    port: u16,
}

impl TestServer {
    fn start(extra_args: &[&str]) -> Self {
        let port = PORT_COUNTER.fetch_add(1, Ordering::SeqCst);

        let child = Command::new(env!("CARGO_BIN_EXE_codeshot-server"))
            .args(["--host", "127.0.0.1", "--port", &port.to_string(), "--no-ocr"])
            .args(extra_args)
            .spawn()
            .expect("Failed to start server");

        Self { child, port }
    }

    fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Poll /health until the server answers
    async fn ready(&self, client: &reqwest::Client) {
        for _ in 0..100 {
            let url = format!("{}/health", self.base_url());
            if client.get(&url).send().await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("server on port {} never became ready", self.port);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn image_part(img: &RgbaImage) -> Part {
    Part::bytes(png_bytes(img))
        .file_name("shot.png")
        .mime_str("image/png")
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let response: HealthResponse = client
        .get(&format!("{}/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.status, "ok");
}

#[tokio::test]
async fn test_info_reflects_arguments() {
    let server = TestServer::start(&["--default-preset", "textOnly"]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let response: InfoResponse = client
        .get(&format!("{}/info", server.base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert!(!response.version.is_empty());
    assert_eq!(response.ocr_engine, None);
    assert_eq!(response.default_preset, "text-only");
    assert!(response.detectable_languages >= 30);
}

#[tokio::test]
async fn test_unknown_default_preset_fails_startup() {
    let port = PORT_COUNTER.fetch_add(1, Ordering::SeqCst);
    let status = Command::new(env!("CARGO_BIN_EXE_codeshot-server"))
        .args(["--port", &port.to_string(), "--no-ocr", "--default-preset", "sepia"])
        .status()
        .expect("Failed to run server");

    assert!(!status.success());
}

#[tokio::test]
async fn test_classify_react_snippet() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let text = "import { useState } from 'react';\n\
                function foo() { return <div className=\"x\">hi</div>; }";

    let response: ClassifyResponse = client
        .post(&format!("{}/classify", server.base_url()))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.language, "typescriptreact");
    assert_eq!(response.name, "TSX");

    let js = response
        .candidates
        .iter()
        .find(|c| c.language == "javascript")
        .expect("javascript should score too");
    assert!(response.score > js.score);
}

#[tokio::test]
async fn test_classify_plain_text() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let response: ClassifyResponse = client
        .post(&format!("{}/classify", server.base_url()))
        .json(&serde_json::json!({ "text": "" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(response.language, "plaintext");
    assert_eq!(response.score, 0);
    assert!(response.candidates.is_empty());
}

#[tokio::test]
async fn test_enhance_threshold() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([200, 200, 200, 255]));
    img.put_pixel(1, 0, Rgba([50, 50, 50, 255]));

    let form = Form::new()
        .part("file", image_part(&img))
        .text("settings", r#"{"threshold": 128}"#);

    let response = client
        .post(&format!("{}/enhance", server.base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["content-type"], "image/png");

    let bytes = response.bytes().await.unwrap();
    let out = image::load_from_memory(&bytes).unwrap().into_rgba8();
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 255]);
}

#[tokio::test]
async fn test_enhance_default_is_identity() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let img = RgbaImage::from_fn(5, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 17, 200]));

    let response = client
        .post(&format!("{}/enhance", server.base_url()))
        .multipart(Form::new().part("file", image_part(&img)))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let bytes = response.bytes().await.unwrap();
    let out = image::load_from_memory(&bytes).unwrap().into_rgba8();
    assert_eq!(out, img);
}

#[tokio::test]
async fn test_extract_unavailable_without_ocr() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let img = RgbaImage::new(2, 2);
    let response = client
        .post(&format!("{}/extract", server.base_url()))
        .multipart(Form::new().part("file", image_part(&img)))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 503);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.code, "OCR_UNAVAILABLE");
}

#[tokio::test]
async fn test_languages_endpoint() {
    let server = TestServer::start(&[]);
    let client = reqwest::Client::new();
    server.ready(&client).await;

    let languages: Vec<LanguageInfo> = client
        .get(&format!("{}/languages", server.base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(languages[0].tag, "plaintext");
    let cpp = languages.iter().find(|l| l.tag == "cpp").unwrap();
    assert_eq!(cpp.name, "C++");
}

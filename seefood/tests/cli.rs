use assert_cmd::Command;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use httpmock::Method::POST;
use httpmock::MockServer;
use image::{GenericImageView, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn seefood() -> Command {
    let mut cmd = Command::cargo_bin("seefood").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("GOOGLE_VISION_API_KEY")
        .env_remove("VISION_ENDPOINT")
        .env_remove("VISION_BUNDLE_ID")
        .env_remove("VISION_ANDROID_PACKAGE")
        .env_remove("VISION_ANDROID_CERT")
        .env_remove("VISION_TIMEOUT_SECS");
    cmd
}

fn write_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("photo.png");
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .save(&path)
        .unwrap();
    path
}

fn write_response(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("response.json");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn interpret_saved_label_response() {
    let dir = TempDir::new().unwrap();
    let path = write_response(
        dir.path(),
        r#"{"responses":[{"labelAnnotations":[{"description":"pizza","score":0.70}]}]}"#,
    );
    seefood()
        .arg("interpret")
        .arg(&path)
        .assert()
        .success()
        .stdout("object:pizza score:0.7\n");
}

#[test]
fn interpret_from_stdin() {
    seefood()
        .args(["interpret", "-"])
        .write_stdin(r#"{"responses":[{"labelAnnotations":[{"description":"pizza","score":0.4}]}]}"#)
        .assert()
        .success()
        .stdout("No face or object accurately detected\n");
}

#[test]
fn interpret_api_error_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_response(
        dir.path(),
        r#"{"error":{"code":403,"message":"Forbidden"}}"#,
    );
    seefood()
        .arg("interpret")
        .arg(&path)
        .assert()
        .failure()
        .stdout("Error code 403: Forbidden\n");
}

#[test]
fn interpret_malformed_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_response(dir.path(), "{ nope");
    seefood().arg("interpret").arg(&path).assert().failure();
}

#[test]
fn request_prints_body() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), 30, 20);
    let out = seefood().arg("request").arg(&image).output().unwrap();
    assert!(out.status.success());
    let body: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let content = body["requests"][0]["image"]["content"].as_str().unwrap();
    let png = STANDARD.decode(content).unwrap();
    assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (30, 20));
    assert_eq!(body["requests"][0]["features"][0]["type"], "FACE_DETECTION");
}

#[test]
fn request_downscales_past_limit() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), 100, 50);
    let out = seefood()
        .arg("request")
        .arg(&image)
        .args(["--max-bytes", "1", "--target-width", "40"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let body: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let content = body["requests"][0]["image"]["content"].as_str().unwrap();
    let png = STANDARD.decode(content).unwrap();
    assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (40, 20));
}

#[test]
fn annotate_against_mock_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/images:annotate")
            .query_param("key", "abc")
            .header("x-android-package", "com.example.seefood");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"responses":[{"faceAnnotations":[
                    {"joyLikelihood":"VERY_LIKELY","sorrowLikelihood":"VERY_UNLIKELY",
                     "surpriseLikelihood":"VERY_UNLIKELY","angerLikelihood":"VERY_UNLIKELY"}]}]}"#,
            );
    });

    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), 16, 16);
    seefood()
        .arg("annotate")
        .arg(&image)
        .args(["--api-key", "abc", "--endpoint"])
        .arg(server.url("/v1/images:annotate"))
        .args(["--android-package", "com.example.seefood"])
        .assert()
        .success()
        .stdout("joy: 90%\nsorrow: 0%\nsurprise: 0%\nanger: 0%\n");
    mock.assert();
}

#[test]
fn annotate_reports_rejection() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(403)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":403,"message":"Requests from this iOS client application are blocked."}}"#);
    });

    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), 16, 16);
    seefood()
        .arg("annotate")
        .arg(&image)
        .args(["--api-key", "abc", "--endpoint"])
        .arg(server.url("/v1/images:annotate"))
        .assert()
        .failure();
}

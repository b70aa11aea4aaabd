// File serving, preflight and routing integration tests

use super::test_harness;
use hanko::config::StampStyle;

// Test: missing file is a 404 with the documented body
#[test]
fn test_missing_upload_is_404() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .get(format!("{}/uploads/nonexistent.jpg", server.base_url))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(resp.text().unwrap(), "File not found");
}

#[test]
fn test_unknown_route_is_404() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .get(format!("{}/does-not-exist", server.base_url))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(resp.text().unwrap(), "Not found");
}

#[test]
fn test_post_to_unknown_route_is_404() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/uploads/whatever.jpg", server.base_url))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

// Test: OPTIONS preflight carries the CORS header set on any path
#[test]
fn test_options_preflight() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/upload", server.base_url),
        )
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let headers = resp.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type"
    );
}

// Test: content type is inferred from the stored file's extension
#[test]
fn test_served_content_types() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    std::fs::write(
        server.upload_dir.path().join("direct.png"),
        test_harness::png_fixture(8, 8),
    )
    .unwrap();
    std::fs::write(server.upload_dir.path().join("direct.jpg"), b"stub").unwrap();
    std::fs::write(server.upload_dir.path().join("direct.bin"), b"stub").unwrap();

    let png = client
        .get(format!("{}/uploads/direct.png", server.base_url))
        .send()
        .unwrap();
    assert_eq!(png.headers().get("content-type").unwrap(), "image/png");

    let jpg = client
        .get(format!("{}/uploads/direct.jpg", server.base_url))
        .send()
        .unwrap();
    assert_eq!(jpg.headers().get("content-type").unwrap(), "image/jpeg");

    let bin = client
        .get(format!("{}/uploads/direct.bin", server.base_url))
        .send()
        .unwrap();
    assert_eq!(
        bin.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
}

// Test: traversal attempts cannot escape the upload directory
#[test]
fn test_path_traversal_is_contained() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .get(format!("{}/uploads/..%2F..%2Fetc%2Fpasswd", server.base_url))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

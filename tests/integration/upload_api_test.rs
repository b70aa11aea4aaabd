// Upload endpoint integration tests

use super::test_harness;
use hanko::config::StampStyle;

// Test: data-URI upload returns a .jpg URL and creates a non-empty file
#[test]
fn test_upload_with_data_uri_returns_jpg_url() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let body = serde_json::json!({ "image": test_harness::png_data_uri(200, 100) });
    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&body)
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let json: serde_json::Value = resp.json().unwrap();
    let url = json["url"].as_str().unwrap();
    assert!(url.ends_with(".jpg"), "url was {}", url);
    assert!(url.starts_with(&server.base_url));

    let filename = url.rsplit('/').next().unwrap();
    let metadata = std::fs::metadata(server.upload_dir.path().join(filename)).unwrap();
    assert!(metadata.len() > 0);
}

// Test: missing image field is a 400 with the documented message
#[test]
fn test_upload_without_image_field_is_400() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let json: serde_json::Value = resp.json().unwrap();
    assert_eq!(json["error"], "No image data provided");
}

#[test]
fn test_upload_invalid_base64_is_500() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&serde_json::json!({ "image": "!!! not base64 !!!" }))
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 500);
    let json: serde_json::Value = resp.json().unwrap();
    assert!(json["error"].as_str().unwrap().len() > 0);
}

#[test]
fn test_upload_non_json_body_is_500() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/upload", server.base_url))
        .body("this is not json")
        .send()
        .unwrap();

    assert_eq!(resp.status().as_u16(), 500);
}

// Test: watermarked output decodes as JPEG with the input's dimensions
#[test]
fn test_watermarked_upload_preserves_dimensions() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let body = serde_json::json!({ "image": test_harness::png_base64(300, 200) });
    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&body)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: serde_json::Value = resp.json().unwrap();
    let url = json["url"].as_str().unwrap().to_string();

    let served = client.get(url).send().unwrap().bytes().unwrap();
    assert_eq!(&served[0..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&served).unwrap();
    assert_eq!(decoded.width(), 300);
    assert_eq!(decoded.height(), 200);
}

#[test]
fn test_centered_stamp_variant_works() {
    let server = test_harness::start(StampStyle::CenteredStamp, true);
    let client = reqwest::blocking::Client::new();

    let body = serde_json::json!({ "image": test_harness::png_base64(160, 90) });
    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&body)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: serde_json::Value = resp.json().unwrap();
    let served = client
        .get(json["url"].as_str().unwrap())
        .send()
        .unwrap()
        .bytes()
        .unwrap();

    let decoded = image::load_from_memory(&served).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (160, 90));
}

// Test: /upload-original saves the decoded payload byte-for-byte
#[test]
fn test_upload_original_preserves_bytes() {
    let server = test_harness::start(StampStyle::CornerBadges, true);
    let client = reqwest::blocking::Client::new();

    let fixture = test_harness::png_fixture(64, 48);
    let body = serde_json::json!({ "image": test_harness::png_base64(64, 48) });
    let resp = client
        .post(format!("{}/upload-original", server.base_url))
        .json(&body)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: serde_json::Value = resp.json().unwrap();
    let url = json["url"].as_str().unwrap();
    let filename = url.rsplit('/').next().unwrap();
    assert!(filename.starts_with("original_"));

    let served = client.get(url).send().unwrap().bytes().unwrap();
    assert_eq!(served.as_ref(), fixture.as_slice());
}

// Test: missing overlay assets fail open, saving the original bytes
#[test]
fn test_upload_without_assets_saves_original_bytes() {
    let server = test_harness::start(StampStyle::CornerBadges, false);
    let client = reqwest::blocking::Client::new();

    let fixture = test_harness::png_fixture(50, 40);
    let body = serde_json::json!({ "image": test_harness::png_base64(50, 40) });
    let resp = client
        .post(format!("{}/upload", server.base_url))
        .json(&body)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: serde_json::Value = resp.json().unwrap();
    let served = client
        .get(json["url"].as_str().unwrap())
        .send()
        .unwrap()
        .bytes()
        .unwrap();

    assert_eq!(served.as_ref(), fixture.as_slice());
}

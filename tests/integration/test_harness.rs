// Test utilities for starting the upload server and building image fixtures

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hanko::config::{AppConfig, StampStyle};
use hanko::server::Server;
use hanko::storage::Storage;
use hanko::watermark::WatermarkProcessor;
use image::{DynamicImage, Rgba, RgbaImage};
use tempfile::TempDir;

/// A running server plus the temp directories backing it.
///
/// Directories are removed when the struct is dropped; the server thread is
/// left to die with the process.
pub struct TestServer {
    pub base_url: String,
    pub upload_dir: TempDir,
    _assets_dir: TempDir,
}

/// Start a server on an ephemeral port.
///
/// With `with_assets` false, overlay assets are absent, so the watermark
/// pipeline is unavailable and uploads fall back to the original bytes.
pub fn start(stamp: StampStyle, with_assets: bool) -> TestServer {
    let upload_dir = tempfile::tempdir().expect("upload dir");
    let assets_dir = tempfile::tempdir().expect("assets dir");

    if with_assets {
        write_assets(assets_dir.path());
    }

    let config = AppConfig {
        upload_dir: upload_dir.path().to_path_buf(),
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: None,
        stamp,
        quality: None,
        assets_dir: assets_dir.path().to_path_buf(),
    };

    let storage = Storage::open(&config.upload_dir).expect("storage");
    let processor = WatermarkProcessor::from_config(&config).ok();

    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let server = runtime
        .block_on(Server::bind(config, storage, processor))
        .expect("bind");
    let base_url = format!("http://{}", server.local_addr());

    std::thread::spawn(move || {
        let _ = runtime.block_on(server.serve());
    });

    TestServer {
        base_url,
        upload_dir,
        _assets_dir: assets_dir,
    }
}

/// Encode a solid-color image fixture as PNG bytes.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    encode_fixture(width, height, image::ImageOutputFormat::Png)
}

/// Base64 of a PNG fixture, without a data-URI prefix.
pub fn png_base64(width: u32, height: u32) -> String {
    BASE64.encode(png_fixture(width, height))
}

/// Base64 of a PNG fixture, with a data-URI prefix.
pub fn png_data_uri(width: u32, height: u32) -> String {
    format!("data:image/png;base64,{}", png_base64(width, height))
}

fn encode_fixture(width: u32, height: u32, format: image::ImageOutputFormat) -> Vec<u8> {
    let rgba = RgbaImage::from_pixel(width, height, Rgba([90, 120, 150, 255]));
    // The JPEG encoder rejects RGBA input
    let img = if matches!(format, image::ImageOutputFormat::Jpeg(_)) {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
    } else {
        DynamicImage::ImageRgba8(rgba)
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("fixture encode");
    out.into_inner()
}

/// Write the overlay assets the built-in plans expect.
fn write_assets(dir: &Path) {
    std::fs::write(
        dir.join("logo.png"),
        encode_fixture(40, 20, image::ImageOutputFormat::Png),
    )
    .expect("logo asset");
    std::fs::write(
        dir.join("insta.jpg"),
        encode_fixture(16, 16, image::ImageOutputFormat::Jpeg(90)),
    )
    .expect("left icon asset");
    std::fs::write(
        dir.join("link.png"),
        encode_fixture(16, 16, image::ImageOutputFormat::Png),
    )
    .expect("right icon asset");
}

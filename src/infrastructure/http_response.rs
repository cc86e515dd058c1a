// HTTP response utilities for rendered documents with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
};
use tokio::io::AsyncReadExt;

/// True when the client lists `br` in `Accept-Encoding` with a non-zero weight.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|entry| brotli_weight(entry).is_some_and(|q| q > 0.0)))
        .unwrap_or(false)
}

// Weight of a single `br` entry such as `br;q=0.5`; `None` for other codings.
fn brotli_weight(entry: &str) -> Option<f32> {
    let mut params = entry.split(';').map(str::trim);
    if !params.next()?.eq_ignore_ascii_case("br") {
        return None;
    }

    let weight = params
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .map(|(_, value)| value.trim().parse::<f32>().unwrap_or(0.0))
        .unwrap_or(1.0);
    Some(weight)
}

pub async fn brotli_compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build a `200 OK` document response, Brotli-encoded when `compress` is set.
pub async fn document_response(
    body: String,
    content_type: &'static str,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let plain = body.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli_compress(&plain).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed {} -> {} bytes",
            plain.len(),
            compressed.len()
        );
        (compressed, Some("br"))
    } else {
        (plain, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder
        .body(Body::from(body_bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

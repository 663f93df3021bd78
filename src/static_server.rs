use http::StatusCode;
use mime_guess::from_path;
use rust_embed::RustEmbed;
use spin_sdk::http::Response;

use crate::core::errors::ApiError;

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

pub fn serve_static(path: &str) -> Result<Response, ApiError> {
    let file_path = match path {
        "/docs" => "docs.html",
        _ => path.trim_start_matches('/'),
    };

    let file = Assets::get(file_path).ok_or_else(|| ApiError::NotFound("Not Found".to_string()))?;
    let mime = from_path(file_path).first_or_octet_stream();

    Ok(Response::builder()
        .status(StatusCode::OK.as_u16())
        .header("Content-Type", mime.as_ref())
        .body(file.data.to_vec())
        .build())
}

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Encodes bytes as `data:<mime>;base64,<payload>`, usable both as a request
/// field and as an image source.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mime = match mime_type.trim() {
        "" => FALLBACK_MIME,
        mime => mime,
    };
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

use base64::{engine::general_purpose::STANDARD, Engine as _};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file handed over by the picker.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Encodes the file as `data:<mime>;base64,<payload>`. Any file is
/// accepted; the declared type wins over sniffing.
pub fn to_data_uri(file: &SelectedFile) -> String {
    let mime = file
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .or_else(|| infer::get(&file.bytes).map(|t| t.mime_type().to_string()))
        .unwrap_or_else(|| FALLBACK_MIME.to_string());

    format!("data:{};base64,{}", mime, STANDARD.encode(&file.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn sniffs_png_when_type_is_missing() {
        let file = SelectedFile {
            file_name: Some("shot".into()),
            content_type: None,
            bytes: PNG_HEADER.to_vec(),
        };
        let uri = to_data_uri(&file);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.ends_with(&STANDARD.encode(PNG_HEADER)));
    }

    #[test]
    fn declared_type_wins_and_unknown_bytes_fall_back() {
        let declared = SelectedFile {
            file_name: None,
            content_type: Some("image/gif".into()),
            bytes: PNG_HEADER.to_vec(),
        };
        assert!(to_data_uri(&declared).starts_with("data:image/gif;base64,"));

        let unknown = SelectedFile {
            file_name: None,
            content_type: Some("".into()),
            bytes: b"plain".to_vec(),
        };
        assert_eq!(to_data_uri(&unknown), "data:application/octet-stream;base64,cGxhaW4=");
    }
}

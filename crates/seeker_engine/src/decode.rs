use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// How far into the document a `<meta charset>` declaration is looked for.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode page bytes as {encoding}")]
    Malformed { encoding: String },
}

/// Decode page bytes to UTF-8. Encoding is chosen from the BOM, then the
/// Content-Type charset, then a `<meta charset>` prescan, then a chardetng guess.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(charset_param).and_then(label_encoding))
        .or_else(|| meta_charset(bytes).and_then(label_encoding))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors && actual == UTF_8 {
        return Err(DecodeError::Malformed {
            encoding: actual.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: actual.name().to_string(),
    })
}

fn label_encoding(label: String) -> Option<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!label.is_empty()).then_some(label)
}

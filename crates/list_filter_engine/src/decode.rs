//! Snapshot byte decoding.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into a snapshot a `<meta charset>` declaration is honoured.
const META_SCAN_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub html: String,
    pub encoding: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("snapshot is not valid {encoding}")]
    Malformed { encoding: &'static str },
    #[error("unknown charset label {0:?}")]
    UnknownLabel(String),
}

/// Decode snapshot bytes: BOM, then the explicit hint, then `<meta charset>`, then detection.
///
/// An explicit hint that names no known encoding is an error; a bad meta label is skipped.
pub fn decode_snapshot(bytes: &[u8], charset_hint: Option<&str>) -> Result<DecodedSnapshot, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = charset_hint {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))?;
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = meta_charset(bytes).and_then(|label| Encoding::for_label(label.as_bytes())) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SCAN_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!label.is_empty()).then_some(label)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedSnapshot, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    Ok(DecodedSnapshot {
        html: text.into_owned(),
        encoding: encoding.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins_over_hint() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("café".as_bytes());
        let decoded = decode_snapshot(&bytes, Some("windows-1252")).unwrap();
        assert_eq!(decoded.encoding, "UTF-8");
        assert_eq!(decoded.html, "café");
    }

    #[test]
    fn meta_charset_is_honoured() {
        let mut bytes = b"<meta charset=\"windows-1252\"><p>caf".to_vec();
        bytes.push(0xE9);
        let decoded = decode_snapshot(&bytes, None).unwrap();
        assert_eq!(decoded.encoding, "windows-1252");
        assert!(decoded.html.ends_with("café"));
    }

    #[test]
    fn unknown_hint_is_rejected() {
        let err = decode_snapshot(b"<p>x</p>", Some("klingon-8")).unwrap_err();
        assert_eq!(err, DecodeError::UnknownLabel("klingon-8".into()));
    }

    #[test]
    fn invalid_utf8_under_explicit_hint_fails() {
        let err = decode_snapshot(&[0x61, 0xFF, 0x62], Some("utf-8")).unwrap_err();
        assert_eq!(err, DecodeError::Malformed { encoding: "UTF-8" });
    }
}

//! Render-link encoding
//!
//! The PlantUML server accepts the diagram source in the URL path: raw
//! DEFLATE, then a 6-bit alphabet close to base64 but URL-safe and in a
//! different order (`0-9A-Za-z-_`). The encoding is reversible; [`decode`]
//! is the inverse.

use std::io::prelude::*;

use anyhow::{anyhow, Result};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::normalize::DiagramDocument;

/// Base URL of the public PlantUML rendering server
pub const RENDER_HOST: &str = "https://www.plantuml.com/plantuml";

/// Image format requested from the rendering server
const RENDER_FORMAT: &str = "png";

/// PlantUML's 6-bit alphabet, in value order
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Compose the image URL for a normalized document.
///
/// Deterministic: equal documents yield equal URLs. No network I/O happens
/// here; the URL is resolved by whoever fetches the image.
pub fn render_url(doc: &DiagramDocument) -> String {
    format!("{RENDER_HOST}/{RENDER_FORMAT}/{}", encode(doc.as_str()))
}

/// Encode text into a PlantUML URL token: raw DEFLATE + 6-bit alphabet.
pub fn encode(text: &str) -> String {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing into an in-memory Vec cannot fail.
    encoder
        .write_all(text.as_bytes())
        .expect("deflate into Vec");
    let deflated = encoder.finish().expect("deflate into Vec");
    encode64(&deflated)
}

/// Decode a PlantUML URL token back into the original text.
pub fn decode(token: &str) -> Result<String> {
    let bytes = decode64(token)?;
    // The final 4-char group zero-pads to a full 3 bytes; the inflater stops
    // at the end of the DEFLATE stream and ignores the padding.
    let mut decoder = DeflateDecoder::new(bytes.as_slice());
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(text)
}

/// 3 bytes -> 4 alphabet chars, final group zero-padded
fn encode64(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);
        out.push(ALPHABET[(b1 >> 2) as usize] as char);
        out.push(ALPHABET[(((b1 & 0x03) << 4) | (b2 >> 4)) as usize] as char);
        out.push(ALPHABET[(((b2 & 0x0f) << 2) | (b3 >> 6)) as usize] as char);
        out.push(ALPHABET[(b3 & 0x3f) as usize] as char);
    }
    out
}

fn decode64(token: &str) -> Result<Vec<u8>> {
    let mut values = Vec::with_capacity(token.len());
    for c in token.chars() {
        values.push(decode6bit(c).ok_or_else(|| anyhow!("invalid character {c:?} in token"))?);
    }

    let mut out = Vec::with_capacity(values.len() / 4 * 3);
    for chunk in values.chunks(4) {
        let c1 = chunk[0];
        let c2 = chunk.get(1).copied().unwrap_or(0);
        let c3 = chunk.get(2).copied().unwrap_or(0);
        let c4 = chunk.get(3).copied().unwrap_or(0);
        out.push((c1 << 2) | (c2 >> 4));
        out.push(((c2 & 0x0f) << 4) | (c3 >> 2));
        out.push(((c3 & 0x03) << 6) | c4);
    }
    Ok(out)
}

fn decode6bit(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        'a'..='z' => Some(c as u8 - b'a' + 36),
        '-' => Some(62),
        '_' => Some(63),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_encode64_known_vectors() {
        assert_eq!(encode64(&[]), "");
        assert_eq!(encode64(&[0]), "0000");
        assert_eq!(encode64(&[0xff, 0xff, 0xff]), "____");
        // 'A' = 0b01000001 -> 6-bit groups 16, 16, 0, 0
        assert_eq!(encode64(b"A"), "GG00");
    }

    #[test]
    fn test_decode64_inverts_encode64_on_full_groups() {
        let data = b"abcdef";
        assert_eq!(decode64(&encode64(data)).unwrap(), data);
    }

    #[test]
    fn test_decode64_rejects_foreign_characters() {
        assert!(decode64("ab+d").is_err());
        assert!(decode64("ab=d").is_err());
    }

    #[test]
    fn test_encode_is_deterministic_and_url_safe() {
        let doc = "@startuml\nBob -> Alice : hello\n@enduml";
        let token = encode(doc);
        assert_eq!(token, encode(doc));
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let doc = "@startuml\nparticipant User\nUser -> System : request\n@enduml";
        assert_eq!(decode(&encode(doc)).unwrap(), doc);
    }

    #[test]
    fn test_render_url_has_fixed_prefix() {
        let doc = normalize("Alice -> Bob");
        let url = render_url(&doc);
        assert!(url.starts_with("https://www.plantuml.com/plantuml/png/"));
        assert_eq!(url, render_url(&doc));
    }
}

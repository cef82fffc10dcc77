//! Charset glue between raw bytes and the detector
//!
//! Models are trained on the *byte* profile of a sample in each encoding.
//! Bytes are widened one-to-one into characters (byte `b` → `U+00bb`), so the
//! same input text can be scored against every encoding's vector while the
//! raw bytes stay available for the UTF-8 check.
//!
//! Identifiers follow Python codec names. Most of them resolve through the
//! WHATWG label table of `encoding_rs`, but that table maps `latin1` and
//! `ascii` to windows-1252, so those two are encoded by identity instead.

use encoding_rs::{EncoderResult, Encoding};
use thiserror::Error;

/// Identifiers whose `_` → `-` spelling is not a WHATWG label
const ALIASES: &[(&str, &str)] = &[
    ("mac_cyrillic", "x-mac-cyrillic"),
    ("mac_roman", "macintosh"),
];

/// Codecs whose bytes equal the code points up to a limit
const IDENTITY_CODECS: &[(&str, &str, char)] = &[
    ("latin_1", "ISO-8859-1", '\u{ff}'),
    ("latin1", "ISO-8859-1", '\u{ff}'),
    ("iso8859_1", "ISO-8859-1", '\u{ff}'),
    ("iso_8859_1", "ISO-8859-1", '\u{ff}'),
    ("l1", "ISO-8859-1", '\u{ff}'),
    ("ascii", "US-ASCII", '\u{7f}'),
    ("us_ascii", "US-ASCII", '\u{7f}'),
];

#[derive(Error, Debug)]
pub enum CharsetError {
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Encoding {0} cannot be used to encode training samples")]
    NotEncodable(String),
}

pub type CharsetResult<T> = Result<T, CharsetError>;

/// A resolved encoding identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Every char up to `max` is the byte with the same value
    Identity { name: &'static str, max: char },
    Table(&'static Encoding),
}

impl Codec {
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Identity { name, .. } => *name,
            Codec::Table(encoding) => encoding.name(),
        }
    }
}

/// Resolve an encoding identifier such as `windows_1250` or `iso8859_2`.
pub fn resolve(id: &str) -> CharsetResult<Codec> {
    let lowered = id.trim().to_ascii_lowercase().replace('-', "_");
    if let Some(&(_, name, max)) = IDENTITY_CODECS.iter().find(|(alias, _, _)| *alias == lowered) {
        return Ok(Codec::Identity { name, max });
    }

    let label = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| lowered.replace('_', "-"));

    Encoding::for_label(label.as_bytes())
        .map(Codec::Table)
        .ok_or_else(|| CharsetError::UnknownEncoding(id.to_string()))
}

/// Encode a UTF-8 sample into the encoding named `id`.
///
/// Characters the target encoding cannot represent are dropped from the
/// output; the number dropped is logged once per call.
pub fn encode_sample(text: &str, id: &str) -> CharsetResult<Vec<u8>> {
    let codec = resolve(id)?;
    let (bytes, dropped) = match codec {
        Codec::Identity { max, .. } => encode_identity(text, max),
        Codec::Table(encoding) => {
            if encoding.output_encoding() != encoding {
                return Err(CharsetError::NotEncodable(id.to_string()));
            }
            encode_table(text, encoding)
        }
    };

    if dropped > 0 {
        tracing::warn!(
            "Sample contains {} characters not representable in {} ({}); they were dropped",
            dropped,
            id,
            codec.name()
        );
    }
    Ok(bytes)
}

fn encode_identity(text: &str, max: char) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut dropped = 0;
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(b) if c <= max => bytes.push(b),
            _ => dropped += 1,
        }
    }
    (bytes, dropped)
}

fn encode_table(text: &str, encoding: &'static Encoding) -> (Vec<u8>, usize) {
    let mut encoder = encoding.new_encoder();
    let mut bytes = Vec::with_capacity(text.len());
    let mut dropped = 0;
    let mut rest = text;
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(rest.len())
            .unwrap_or(rest.len() + 16);
        bytes.reserve(needed);

        // The unmappable char is consumed, not written
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut bytes, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => dropped += 1,
        }
    }
    (bytes, dropped)
}

/// Widen each byte to the character with the same code point.
pub fn widen(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

//! Encodes text to and decodes text from raw bytes in a named encoding.
//!
//! Conversion goes through a normalized UTF-16 form: text of any code unit
//! width is first widened or narrowed to UTF-16, then handed to a
//! [`TextConverter`] that produces the named target encoding (and the reverse
//! for decoding).
//!
//! The converter is optional. A [`TextCodec::raw`] codec has none and copies
//! bytes straight through without re-encoding anything. That keeps string
//! reads and writes available everywhere, but only ASCII survives a trip
//! between differing encodings in that mode.

use crate::error::{Error, Result};
use std::char::REPLACEMENT_CHARACTER;
use std::fmt;

/// A code unit of in-memory text: `u8` for UTF-8, `u16` for UTF-16 and `u32`
/// for UTF-32.
pub trait CodeUnit: Copy + Sized + 'static {
    /// Width of one code unit in bytes.
    const WIDTH: usize;

    /// Name of the Unicode form this code unit represents.
    const FORM: &'static str;

    /// Converts text of this width into UTF-16.
    fn to_utf16(text: &[Self]) -> Result<Vec<u16>>;

    /// Converts UTF-16 into text of this width.
    fn from_utf16(units: &[u16]) -> Result<Vec<Self>>;

    /// Copies the native-endian bytes of every unit.
    fn copy_to_bytes(text: &[Self]) -> Vec<u8>;

    /// Reassembles units from native-endian bytes.
    fn copy_from_bytes(raw: &[u8]) -> Result<Vec<Self>>;
}

impl CodeUnit for u8 {
    const WIDTH: usize = 1;
    const FORM: &'static str = "UTF-8";

    fn to_utf16(text: &[Self]) -> Result<Vec<u16>> {
        let text = std::str::from_utf8(text).map_err(|e| Error::encoding(Self::FORM, e.to_string()))?;
        Ok(text.encode_utf16().collect())
    }

    fn from_utf16(units: &[u16]) -> Result<Vec<Self>> {
        String::from_utf16(units)
            .map(String::into_bytes)
            .map_err(|e| Error::encoding(Self::FORM, e.to_string()))
    }

    fn copy_to_bytes(text: &[Self]) -> Vec<u8> {
        text.to_vec()
    }

    fn copy_from_bytes(raw: &[u8]) -> Result<Vec<Self>> {
        Ok(raw.to_vec())
    }
}

impl CodeUnit for u16 {
    const WIDTH: usize = 2;
    const FORM: &'static str = "UTF-16";

    fn to_utf16(text: &[Self]) -> Result<Vec<u16>> {
        Ok(text.to_vec())
    }

    fn from_utf16(units: &[u16]) -> Result<Vec<Self>> {
        Ok(units.to_vec())
    }

    fn copy_to_bytes(text: &[Self]) -> Vec<u8> {
        text.iter().flat_map(|unit| unit.to_ne_bytes()).collect()
    }

    fn copy_from_bytes(raw: &[u8]) -> Result<Vec<Self>> {
        if raw.len() % Self::WIDTH != 0 {
            return Err(Error::size_mismatch(raw.len().next_multiple_of(Self::WIDTH), raw.len()));
        }
        Ok(raw
            .chunks_exact(Self::WIDTH)
            .map(|chunk| u16::from_ne_bytes([chunk[0], chunk[1]]))
            .collect())
    }
}

impl CodeUnit for u32 {
    const WIDTH: usize = 4;
    const FORM: &'static str = "UTF-32";

    fn to_utf16(text: &[Self]) -> Result<Vec<u16>> {
        let mut units = Vec::with_capacity(text.len());
        let mut buf = [0u16; 2];
        for &scalar in text {
            let c = char::from_u32(scalar).ok_or_else(|| {
                Error::encoding(Self::FORM, format!("invalid code point U+{scalar:04X}"))
            })?;
            units.extend_from_slice(c.encode_utf16(&mut buf));
        }
        Ok(units)
    }

    fn from_utf16(units: &[u16]) -> Result<Vec<Self>> {
        char::decode_utf16(units.iter().copied())
            .map(|r| {
                r.map(u32::from).map_err(|e| {
                    Error::encoding(
                        Self::FORM,
                        format!("unpaired surrogate {:#06X}", e.unpaired_surrogate()),
                    )
                })
            })
            .collect()
    }

    fn copy_to_bytes(text: &[Self]) -> Vec<u8> {
        text.iter().flat_map(|unit| unit.to_ne_bytes()).collect()
    }

    fn copy_from_bytes(raw: &[u8]) -> Result<Vec<Self>> {
        if raw.len() % Self::WIDTH != 0 {
            return Err(Error::size_mismatch(raw.len().next_multiple_of(Self::WIDTH), raw.len()));
        }
        Ok(raw
            .chunks_exact(Self::WIDTH)
            .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}

/// A pluggable text conversion service.
///
/// Implementations translate between raw bytes in a named encoding and the
/// normalized UTF-16 form. Invalid encoding names and conversion failures are
/// reported as [`Error::Encoding`] carrying the converter's diagnostic.
pub trait TextConverter {
    /// Decodes `raw`, stored in `encoding`, into UTF-16.
    fn to_utf16(&self, raw: &[u8], encoding: &str) -> Result<Vec<u16>>;

    /// Encodes UTF-16 `text` into `encoding`.
    fn from_utf16(&self, text: &[u16], encoding: &str) -> Result<Vec<u8>>;
}

/// Encodes and decodes strings, optionally through a [`TextConverter`].
#[derive(Default)]
pub struct TextCodec {
    converter: Option<Box<dyn TextConverter + Send + Sync>>,
}

impl TextCodec {
    /// A codec without a converter. Text is copied byte for byte.
    pub fn raw() -> Self {
        Self { converter: None }
    }

    /// A codec that converts through the given converter.
    pub fn new<C: TextConverter + Send + Sync + 'static>(converter: C) -> Self {
        Self {
            converter: Some(Box::new(converter)),
        }
    }

    /// A codec backed by the built-in [`UnicodeConverter`].
    pub fn unicode() -> Self {
        Self::new(UnicodeConverter)
    }

    /// Whether a converter is configured. When `false`, every operation is a
    /// plain byte copy.
    pub fn is_converting(&self) -> bool {
        self.converter.is_some()
    }

    /// Returns the configured converter, or
    /// [`Error::UnsupportedPlatform`] when the codec only copies bytes.
    pub fn converter(&self) -> Result<&(dyn TextConverter + Send + Sync)> {
        self.converter
            .as_deref()
            .ok_or_else(|| Error::unsupported("text conversion"))
    }

    /// Encodes `text` into `encoding`.
    pub fn encode<U: CodeUnit>(&self, text: &[U], encoding: &str) -> Result<Vec<u8>> {
        match &self.converter {
            Some(converter) => converter.from_utf16(&U::to_utf16(text)?, encoding),
            None => Ok(U::copy_to_bytes(text)),
        }
    }

    /// Decodes `raw`, stored in `encoding`, into text of code unit `U`.
    pub fn decode<U: CodeUnit>(&self, raw: &[u8], encoding: &str) -> Result<Vec<U>> {
        match &self.converter {
            Some(converter) => U::from_utf16(&converter.to_utf16(raw, encoding)?),
            None => U::copy_from_bytes(raw),
        }
    }

    /// Encodes a Rust string into `encoding`.
    pub fn encode_str(&self, text: &str, encoding: &str) -> Result<Vec<u8>> {
        self.encode(text.as_bytes(), encoding)
    }

    /// Decodes `raw` into a Rust string. Without a converter the bytes must
    /// already be valid UTF-8.
    pub fn decode_string(&self, raw: &[u8], encoding: &str) -> Result<String> {
        let bytes = self.decode::<u8>(raw, encoding)?;
        String::from_utf8(bytes).map_err(|e| Error::encoding(encoding, e.to_string()))
    }
}

impl fmt::Debug for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCodec")
            .field("converting", &self.is_converting())
            .finish()
    }
}

/// Substitution byte written for characters the target encoding lacks.
const SUBSTITUTE: u8 = 0x1A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Charset {
    Utf8,
    Utf16 { bom: bool, big: bool },
    Utf32 { bom: bool, big: bool },
    Ascii,
    Latin1,
}

impl Charset {
    /// Matches names case-insensitively, ignoring `-`, `_` and spaces.
    fn lookup(name: &str) -> Result<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let charset = match key.as_str() {
            "utf8" => Self::Utf8,
            "utf16" => Self::Utf16 { bom: true, big: true },
            "utf16le" => Self::Utf16 { bom: false, big: false },
            "utf16be" => Self::Utf16 { bom: false, big: true },
            "utf32" => Self::Utf32 { bom: true, big: true },
            "utf32le" => Self::Utf32 { bom: false, big: false },
            "utf32be" => Self::Utf32 { bom: false, big: true },
            "ascii" | "usascii" => Self::Ascii,
            "iso88591" | "latin1" => Self::Latin1,
            _ => return Err(Error::encoding(name, "unsupported encoding")),
        };
        Ok(charset)
    }
}

/// Built-in converter for the Unicode transformation formats plus US-ASCII
/// and ISO-8859-1.
///
/// Malformed input decodes to U+FFFD. Characters a single-byte target cannot
/// represent encode to `0x1A`. `UTF-16` and `UTF-32` without an explicit
/// byte order write a big-endian byte order mark and honour one when
/// decoding, defaulting to big-endian.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeConverter;

impl TextConverter for UnicodeConverter {
    fn to_utf16(&self, raw: &[u8], encoding: &str) -> Result<Vec<u16>> {
        let chars: Vec<char> = match Charset::lookup(encoding)? {
            Charset::Utf8 => return Ok(String::from_utf8_lossy(raw).encode_utf16().collect()),
            Charset::Utf16 { bom, big } => {
                let (big, body) = if bom { detect_bom(raw, 2, big) } else { (big, raw) };
                let units: Vec<u16> = body
                    .chunks_exact(2)
                    .map(|c| {
                        let pair = [c[0], c[1]];
                        if big { u16::from_be_bytes(pair) } else { u16::from_le_bytes(pair) }
                    })
                    .collect();
                let mut chars: Vec<char> = char::decode_utf16(units)
                    .map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
                    .collect();
                if body.len() % 2 != 0 {
                    chars.push(REPLACEMENT_CHARACTER);
                }
                chars
            }
            Charset::Utf32 { bom, big } => {
                let (big, body) = if bom { detect_bom(raw, 4, big) } else { (big, raw) };
                let mut chars: Vec<char> = body
                    .chunks_exact(4)
                    .map(|c| {
                        let quad = [c[0], c[1], c[2], c[3]];
                        let scalar = if big { u32::from_be_bytes(quad) } else { u32::from_le_bytes(quad) };
                        char::from_u32(scalar).unwrap_or(REPLACEMENT_CHARACTER)
                    })
                    .collect();
                if body.len() % 4 != 0 {
                    chars.push(REPLACEMENT_CHARACTER);
                }
                chars
            }
            Charset::Ascii => raw
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { REPLACEMENT_CHARACTER })
                .collect(),
            Charset::Latin1 => raw.iter().map(|&b| char::from(b)).collect(),
        };
        let mut units = Vec::with_capacity(chars.len());
        let mut buf = [0u16; 2];
        for c in chars {
            units.extend_from_slice(c.encode_utf16(&mut buf));
        }
        Ok(units)
    }

    fn from_utf16(&self, text: &[u16], encoding: &str) -> Result<Vec<u8>> {
        let charset = Charset::lookup(encoding)?;
        let chars = char::decode_utf16(text.iter().copied()).map(|r| r.unwrap_or(REPLACEMENT_CHARACTER));
        let mut out = Vec::with_capacity(text.len());
        match charset {
            Charset::Utf8 => {
                let mut buf = [0u8; 4];
                for c in chars {
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
            Charset::Utf16 { bom, big } => {
                if bom {
                    out.extend_from_slice(&[0xFE, 0xFF]);
                }
                let mut buf = [0u16; 2];
                for c in chars {
                    for unit in c.encode_utf16(&mut buf) {
                        out.extend_from_slice(&if big { unit.to_be_bytes() } else { unit.to_le_bytes() });
                    }
                }
            }
            Charset::Utf32 { bom, big } => {
                if bom {
                    out.extend_from_slice(&[0x00, 0x00, 0xFE, 0xFF]);
                }
                for c in chars {
                    let scalar = u32::from(c);
                    out.extend_from_slice(&if big { scalar.to_be_bytes() } else { scalar.to_le_bytes() });
                }
            }
            Charset::Ascii => out.extend(chars.map(|c| if c.is_ascii() { c as u8 } else { SUBSTITUTE })),
            Charset::Latin1 => out.extend(chars.map(|c| u8::try_from(c).unwrap_or(SUBSTITUTE))),
        }
        Ok(out)
    }
}

/// Strips a byte order mark of `width` bytes, returning the detected order.
fn detect_bom(raw: &[u8], width: usize, default_big: bool) -> (bool, &[u8]) {
    let (be, le): (&[u8], &[u8]) = if width == 2 {
        (&[0xFE, 0xFF], &[0xFF, 0xFE])
    } else {
        (&[0x00, 0x00, 0xFE, 0xFF], &[0xFF, 0xFE, 0x00, 0x00])
    };
    if let Some(body) = raw.strip_prefix(be) {
        (true, body)
    } else if let Some(body) = raw.strip_prefix(le) {
        (false, body)
    } else {
        (default_big, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JP: &str = "日本語";

    #[test]
    fn raw_codec_copies_bytes() {
        let codec = TextCodec::raw();
        assert!(!codec.is_converting());
        assert_eq!(codec.encode_str("AB", "UTF-8").unwrap(), b"AB".to_vec());
        // The encoding name is not even looked at.
        assert_eq!(codec.encode_str("AB", "no-such-encoding").unwrap(), b"AB".to_vec());
        assert_eq!(codec.decode_string(b"AB", "UTF-16").unwrap(), "AB");
    }

    #[test]
    fn raw_codec_copies_wide_units_natively() {
        let codec = TextCodec::raw();
        let bytes = codec.encode(&[0x0041u16, 0x3042], "UTF-8").unwrap();
        let mut expected = 0x0041u16.to_ne_bytes().to_vec();
        expected.extend(0x3042u16.to_ne_bytes());
        assert_eq!(bytes, expected);
        assert_eq!(codec.decode::<u16>(&bytes, "UTF-8").unwrap(), vec![0x0041, 0x3042]);
    }

    #[test]
    fn raw_codec_rejects_partial_wide_units() {
        let codec = TextCodec::raw();
        assert!(matches!(
            codec.decode::<u32>(&[1, 2, 3, 4, 5], "UTF-32"),
            Err(Error::SizeMismatch { expected: 8, actual: 5 })
        ));
    }

    #[test]
    fn raw_codec_has_no_converter() {
        match TextCodec::raw().converter() {
            Err(Error::UnsupportedPlatform { capability, .. }) => {
                assert_eq!(capability, "text conversion")
            }
            other => panic!("expected UnsupportedPlatform, got {:?}", other.map(|_| ())),
        }
        assert!(TextCodec::unicode().converter().is_ok());
    }

    #[test]
    fn unicode_encodes_utf16_variants() {
        let codec = TextCodec::unicode();
        assert_eq!(codec.encode_str("AB", "UTF-16LE").unwrap(), vec![0x41, 0x00, 0x42, 0x00]);
        assert_eq!(codec.encode_str("AB", "utf16be").unwrap(), vec![0x00, 0x41, 0x00, 0x42]);
        assert_eq!(
            codec.encode_str("AB", "UTF-16").unwrap(),
            vec![0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]
        );
    }

    #[test]
    fn unicode_decodes_with_bom() {
        let codec = TextCodec::unicode();
        assert_eq!(codec.decode_string(&[0xFF, 0xFE, 0x41, 0x00], "UTF-16").unwrap(), "A");
        assert_eq!(codec.decode_string(&[0xFE, 0xFF, 0x00, 0x41], "UTF-16").unwrap(), "A");
        assert_eq!(codec.decode_string(&[0x00, 0x41], "UTF-16").unwrap(), "A");
        assert_eq!(
            codec.decode_string(&[0xFF, 0xFE, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00], "UTF-32").unwrap(),
            "A"
        );
    }

    #[test]
    fn unicode_round_trips_every_unit_width() {
        let codec = TextCodec::unicode();
        for encoding in ["UTF-8", "UTF-16", "UTF-16LE", "UTF-32BE"] {
            let narrow = codec.encode(JP.as_bytes(), encoding).unwrap();
            let wide: Vec<u16> = JP.encode_utf16().collect();
            let scalars: Vec<u32> = JP.chars().map(u32::from).collect();
            assert_eq!(codec.encode(&wide, encoding).unwrap(), narrow);
            assert_eq!(codec.encode(&scalars, encoding).unwrap(), narrow);

            assert_eq!(codec.decode_string(&narrow, encoding).unwrap(), JP);
            assert_eq!(codec.decode::<u16>(&narrow, encoding).unwrap(), wide);
            assert_eq!(codec.decode::<u32>(&narrow, encoding).unwrap(), scalars);
        }
    }

    #[test]
    fn single_byte_targets_substitute() {
        let codec = TextCodec::unicode();
        assert_eq!(codec.encode_str("aé日", "US-ASCII").unwrap(), vec![b'a', 0x1A, 0x1A]);
        assert_eq!(codec.encode_str("aé日", "ISO-8859-1").unwrap(), vec![b'a', 0xE9, 0x1A]);
        assert_eq!(codec.decode_string(&[b'a', 0xE9], "latin1").unwrap(), "aé");
        assert_eq!(codec.decode_string(&[b'a', 0xE9], "ascii").unwrap(), "a\u{FFFD}");
    }

    #[test]
    fn malformed_input_is_replaced() {
        let codec = TextCodec::unicode();
        assert_eq!(codec.decode_string(&[b'a', 0xFF], "UTF-8").unwrap(), "a\u{FFFD}");
        assert_eq!(codec.decode_string(&[0x00, 0x41, 0x00], "UTF-16BE").unwrap(), "A\u{FFFD}");
    }

    #[test]
    fn unknown_encoding_fails() {
        let codec = TextCodec::unicode();
        match codec.encode_str("AB", "Shift-JIS") {
            Err(Error::Encoding { encoding, message }) => {
                assert_eq!(encoding, "Shift-JIS");
                assert_eq!(message, "unsupported encoding");
            }
            other => panic!("expected Encoding error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_source_text_fails() {
        let codec = TextCodec::unicode();
        assert!(matches!(
            codec.encode(&[0xC3u8], "UTF-16"),
            Err(Error::Encoding { .. })
        ));
        assert!(matches!(
            codec.encode(&[0xD800_0000u32], "UTF-8"),
            Err(Error::Encoding { .. })
        ));
    }
}

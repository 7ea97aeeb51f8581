//! NFC Forum RTD-Text payloads
//!
//! The payload is a status byte, followed by an US-ASCII language code, followed by the text.
//! Bit 7 of the status byte selects UTF-16 over UTF-8, bits 0-5 hold the language code length,
//! bit 6 is reserved and ignored.
//!
//! UTF-16 text honours a leading byte order mark, without one it is read as big endian.

use tracing::debug;

use crate::payload::TextPayloadFormat;

/// Status byte bit selecting UTF-16 encoded text
pub const STATUS_UTF16_FLAG: u8 = 0x80;

/// Status byte bits holding the language code length
pub const LANGUAGE_CODE_LENGTH_MASK: u8 = 0x3F;

pub const MAX_LANGUAGE_CODE_LENGTH: usize = LANGUAGE_CODE_LENGTH_MASK as usize;

const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Record, derive_more::Display)]
#[display("{text}({language_code})")]
pub struct DecodedText {
    pub text: String,
    pub language_code: String,
    pub format: TextPayloadFormat,
}

/// The single kind every decode failure is reported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum DecodeErrorKind {
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum TextDecodeError {
    #[error("payload is empty, missing the status byte")]
    EmptyPayload,

    #[error("language code length {declared} exceeds the {available} bytes after the status byte")]
    LanguageCodeTruncated { declared: u8, available: u64 },

    #[error("language code is not US-ASCII")]
    NonAsciiLanguageCode,

    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("UTF-16 text has an odd number of bytes: {0}")]
    OddUtf16Length(u64),

    #[error("text is not valid UTF-16: {0}")]
    InvalidUtf16(String),
}

impl TextDecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        DecodeErrorKind::InvalidArgument
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum TextEncodeError {
    #[error("language code is not US-ASCII")]
    NonAsciiLanguageCode,

    #[error("language code is {length} bytes, at most 63 fit in the status byte")]
    LanguageCodeTooLong { length: u64 },
}

type Result<T, E = TextDecodeError> = std::result::Result<T, E>;

/// First byte of an RTD-Text payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusByte(u8);

impl From<u8> for StatusByte {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl StatusByte {
    pub fn new(format: TextPayloadFormat, language_code_length: u8) -> Self {
        let encoding = match format {
            TextPayloadFormat::Utf8 => 0,
            TextPayloadFormat::Utf16 => STATUS_UTF16_FLAG,
        };

        Self(encoding | (language_code_length & LANGUAGE_CODE_LENGTH_MASK))
    }

    pub fn format(self) -> TextPayloadFormat {
        if self.0 & STATUS_UTF16_FLAG == 0 {
            TextPayloadFormat::Utf8
        } else {
            TextPayloadFormat::Utf16
        }
    }

    pub fn language_code_length(self) -> usize {
        (self.0 & LANGUAGE_CODE_LENGTH_MASK) as usize
    }

    pub fn byte(self) -> u8 {
        self.0
    }
}

/// Decode a RTD-Text payload into its text and language code
pub fn decode_text_record(payload: &[u8]) -> Result<DecodedText> {
    let Some((&status, rest)) = payload.split_first() else {
        return Err(TextDecodeError::EmptyPayload);
    };

    let status = StatusByte::from(status);
    let language_code_length = status.language_code_length();

    if language_code_length > rest.len() {
        return Err(TextDecodeError::LanguageCodeTruncated {
            declared: language_code_length as u8,
            available: rest.len() as u64,
        });
    }

    let (language_code, text) = rest.split_at(language_code_length);
    let language_code = decode_ascii(language_code)?;

    let format = status.format();
    let text = match format {
        TextPayloadFormat::Utf8 => decode_utf8(text)?,
        TextPayloadFormat::Utf16 => decode_utf16(text)?,
    };

    debug!("decoded {format:?} text record, language: {language_code}");

    Ok(DecodedText {
        text,
        language_code,
        format,
    })
}

/// Build a RTD-Text payload, UTF-16 text is written big endian without a byte order mark
pub fn encode_text_record(
    text: &str,
    language_code: &str,
    format: TextPayloadFormat,
) -> Result<Vec<u8>, TextEncodeError> {
    if !language_code.is_ascii() {
        return Err(TextEncodeError::NonAsciiLanguageCode);
    }

    if language_code.len() > MAX_LANGUAGE_CODE_LENGTH {
        return Err(TextEncodeError::LanguageCodeTooLong {
            length: language_code.len() as u64,
        });
    }

    let status = StatusByte::new(format, language_code.len() as u8);

    let mut payload = Vec::with_capacity(1 + language_code.len() + text.len() * 2);
    payload.push(status.byte());
    payload.extend_from_slice(language_code.as_bytes());

    match format {
        TextPayloadFormat::Utf8 => payload.extend_from_slice(text.as_bytes()),
        TextPayloadFormat::Utf16 => {
            payload.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        }
    }

    Ok(payload)
}

fn decode_ascii(bytes: &[u8]) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(TextDecodeError::NonAsciiLanguageCode);
    }

    // ascii is always valid utf8
    Ok(bytes.iter().map(|&byte| byte as char).collect())
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(ToString::to_string)
        .map_err(|error| TextDecodeError::InvalidUtf8(error.to_string()))
}

fn decode_utf16(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(TextDecodeError::OddUtf16Length(bytes.len() as u64));
    }

    let (bytes, read_unit): (&[u8], fn([u8; 2]) -> u16) =
        if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
            (rest, u16::from_be_bytes)
        } else if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
            (rest, u16::from_le_bytes)
        } else {
            (bytes, u16::from_be_bytes)
        };

    let units = bytes
        .chunks_exact(2)
        .map(|chunk| read_unit([chunk[0], chunk[1]]))
        .collect::<Vec<u16>>();

    String::from_utf16(&units).map_err(|error| TextDecodeError::InvalidUtf16(error.to_string()))
}

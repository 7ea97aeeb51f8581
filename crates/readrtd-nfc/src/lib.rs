uniffi::setup_scaffolding!();

pub mod ffi;
pub mod header;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;
pub mod text;

pub use message::NdefMessage;
pub use ndef_type::NdefType;
pub use parser::{NdefParseError, parse_ndef_message};
pub use payload::{NdefPayload, TextPayloadFormat};
pub use record::{NdefRecord, RTD_TEXT_TYPE, is_text_record};
pub use text::{
    DecodeErrorKind, DecodedText, TextDecodeError, TextEncodeError, decode_text_record,
    encode_text_record,
};

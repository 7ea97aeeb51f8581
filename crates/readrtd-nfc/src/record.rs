use tracing::warn;

use crate::{
    header::NdefHeader,
    ndef_type::NdefType,
    payload::NdefPayload,
    text::{self, DecodedText, TextDecodeError},
};

/// Well known type of a RTD-Text record
pub const RTD_TEXT_TYPE: &[u8] = b"T";

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: NdefPayload,
}

impl NdefRecord {
    /// Build a record from the parts a host hands over, text payloads are decoded eagerly
    pub fn new(type_name_format: NdefType, type_: Vec<u8>, payload: Vec<u8>) -> Self {
        let header = NdefHeader::standalone(
            type_name_format,
            type_.len().min(u8::MAX as usize) as u8,
            payload.len().min(u32::MAX as usize) as u32,
            None,
        );

        let payload = classify_payload(type_name_format, &type_, payload);

        Self {
            header,
            type_,
            id: None,
            payload,
        }
    }

    pub fn type_name_format(&self) -> NdefType {
        self.header.type_name_format
    }

    pub fn is_text_record(&self) -> bool {
        is_rtd_text(self.type_name_format(), &self.type_)
    }

    /// `None` when the record is not RTD-Text, otherwise the decoded text or why it failed
    pub fn decode_text(&self) -> Option<Result<DecodedText, TextDecodeError>> {
        if !self.is_text_record() {
            return None;
        }

        let decoded = match &self.payload {
            NdefPayload::Text(text) => Ok(text.clone()),
            NdefPayload::Data(data) => text::decode_text_record(data),
        };

        Some(decoded)
    }
}

pub fn is_text_record(record: &NdefRecord) -> bool {
    record.is_text_record()
}

pub(crate) fn is_rtd_text(type_name_format: NdefType, type_: &[u8]) -> bool {
    type_name_format == NdefType::WellKnown && type_ == RTD_TEXT_TYPE
}

/// Text records that fail to decode keep their raw bytes, so one bad record does not sink the message
pub(crate) fn classify_payload(
    type_name_format: NdefType,
    type_: &[u8],
    payload: Vec<u8>,
) -> NdefPayload {
    if !is_rtd_text(type_name_format, type_) {
        return NdefPayload::Data(payload);
    }

    match text::decode_text_record(&payload) {
        Ok(text) => NdefPayload::Text(text),
        Err(error) => {
            warn!("unable to decode text record ({}): {error}", hex::encode(&payload));
            NdefPayload::Data(payload)
        }
    }
}

// only used for uniffi
mod ffi {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
    pub struct NdefRecordReader {
        record: NdefRecord,
    }

    #[uniffi::export]
    impl NdefRecordReader {
        #[uniffi::constructor]
        pub fn new(record: NdefRecord) -> Self {
            Self { record }
        }

        pub fn type_(&self) -> Option<String> {
            String::from_utf8(self.record.type_.clone()).ok()
        }

        pub fn id(&self) -> Option<String> {
            let id = self.record.id.as_ref()?;
            String::from_utf8(id.clone()).ok()
        }

        pub fn is_text_record(&self) -> bool {
            self.record.is_text_record()
        }

        pub fn text(&self) -> Option<DecodedText> {
            self.record.decode_text()?.ok()
        }
    }
}

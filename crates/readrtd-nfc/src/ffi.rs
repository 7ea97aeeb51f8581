use crate::{
    message::NdefMessage,
    ndef_type::NdefType,
    parser::NdefParseError,
    payload::TextPayloadFormat,
    record::NdefRecord,
    text::{DecodedText, TextDecodeError, TextEncodeError},
};

#[uniffi::export]
fn is_text_record(record: NdefRecord) -> bool {
    record.is_text_record()
}

#[uniffi::export]
fn decode_text_record(payload: Vec<u8>) -> Result<DecodedText, TextDecodeError> {
    crate::text::decode_text_record(&payload)
}

#[uniffi::export]
fn encode_text_record(
    text: String,
    language_code: String,
    format: TextPayloadFormat,
) -> Result<Vec<u8>, TextEncodeError> {
    crate::text::encode_text_record(&text, &language_code, format)
}

#[uniffi::export]
fn parse_ndef_message(data: Vec<u8>) -> Result<NdefMessage, NdefParseError> {
    crate::parser::parse_ndef_message(&data)
}

#[uniffi::export]
fn ndef_record_new(type_name_format: NdefType, type_: Vec<u8>, payload: Vec<u8>) -> NdefRecord {
    NdefRecord::new(type_name_format, type_, payload)
}

#[uniffi::export]
fn decoded_text_display(text: DecodedText) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_from_host_parts() {
        let record = ndef_record_new(NdefType::WellKnown, b"T".to_vec(), b"\x02enHi".to_vec());

        assert!(is_text_record(record.clone()));
        assert!(record.header.message_begin && record.header.message_end);
        assert!(record.header.short_record);
        assert_eq!(record.header.payload_length, 5);

        let text = record.payload.text().unwrap().clone();
        assert_eq!(decoded_text_display(text), "Hi(en)");
    }

    #[test]
    fn host_round_trip_through_exports() {
        let payload =
            encode_text_record("こんにちは".into(), "ja".into(), TextPayloadFormat::Utf16).unwrap();
        let text = decode_text_record(payload).unwrap();

        assert_eq!(decoded_text_display(text), "こんにちは(ja)");
    }

    #[test]
    fn parse_exported_message() {
        let message = parse_ndef_message(vec![0xD1, 0x01, 0x03, b'U', 0x04, b'a', b'b']).unwrap();
        assert!(!is_text_record(message.records[0].clone()));

        assert_eq!(parse_ndef_message(Vec::new()), Err(NdefParseError::Empty));
    }
}

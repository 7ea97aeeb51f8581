use crate::text::DecodedText;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum NdefPayload {
    /// RTD-Text record that decoded cleanly
    Text(DecodedText),

    /// Any other record, or a text record whose payload could not be decoded
    Data(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

impl NdefPayload {
    pub fn text(&self) -> Option<&DecodedText> {
        match self {
            Self::Text(text) => Some(text),
            Self::Data(_) => None,
        }
    }
}

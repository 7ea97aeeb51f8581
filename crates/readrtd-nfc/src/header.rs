use crate::ndef_type::NdefType;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// Header for a record that is the only record in its message
    pub fn standalone(
        type_name_format: NdefType,
        type_length: u8,
        payload_length: u32,
        id_length: Option<u8>,
    ) -> Self {
        Self {
            message_begin: true,
            message_end: true,
            chunked: false,
            short_record: payload_length <= u8::MAX as u32,
            has_id_length: id_length.is_some(),
            type_name_format,
            type_length,
            payload_length,
            id_length,
        }
    }

    /// Empty records carry no type, id or payload, every other format is unconstrained here
    pub fn is_well_formed(&self) -> bool {
        if self.type_name_format != NdefType::Empty {
            return true;
        }

        self.type_length == 0 && self.payload_length == 0 && self.id_length.unwrap_or(0) == 0
    }
}

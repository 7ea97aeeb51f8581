pub mod stream;

use stream::{Stream, StreamExt as _};
use winnow::{
    ModalResult, Parser,
    binary::{
        be_u32,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    combinator::cut_err,
    error::{ContextError, ErrMode, Needed, StrContext},
    token::{any, take},
};

use crate::{
    header::NdefHeader, message::NdefMessage, ndef_type::NdefType, payload::NdefPayload,
    record::NdefRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefParseError {
    #[error("no bytes to parse")]
    Empty,

    /// Input ended in the middle of a record, `needed` is how many more bytes, if known
    #[error("message is truncated, need more data")]
    Incomplete { needed: Option<u64> },

    /// A header that breaks the NDEF record rules, e.g. an empty record with a payload
    #[error("malformed NDEF message: {0}")]
    Malformed(String),
}

impl From<ErrMode<ContextError>> for NdefParseError {
    fn from(error: ErrMode<ContextError>) -> Self {
        match error {
            ErrMode::Incomplete(Needed::Size(needed)) => Self::Incomplete {
                needed: Some(needed.get() as u64),
            },
            ErrMode::Incomplete(Needed::Unknown) => Self::Incomplete { needed: None },
            error => Self::Malformed(error.to_string()),
        }
    }
}

/// Parse a complete NDEF message, records are returned in the order they appear on the tag
pub fn parse_ndef_message(data: &[u8]) -> Result<NdefMessage, NdefParseError> {
    if data.is_empty() {
        return Err(NdefParseError::Empty);
    }

    let mut input = stream::new(data);
    let records = parse_ndef_records(&mut input)?;

    if !input.is_empty() {
        tracing::debug!("{} trailing bytes after message end", input.len());
    }

    Ok(NdefMessage::new(records))
}

/// Parse records until one carries the message end flag or the input runs out
pub fn parse_ndef_records(input: &mut Stream<'_>) -> ModalResult<Vec<NdefRecord>> {
    let mut records = Vec::new();

    loop {
        let record = parse_ndef_record.parse_next(input)?;
        let message_end = record.header.message_end;
        records.push(record);

        if message_end || input.is_empty() {
            break;
        }
    }

    Ok(records)
}

pub fn parse_ndef_record(input: &mut Stream<'_>) -> ModalResult<NdefRecord> {
    let header = cut_err(parse_header.verify(NdefHeader::is_well_formed))
        .context(StrContext::Label("empty record with type, id or payload"))
        .parse_next(input)?;

    let type_ = parse_type(input, header.type_length)?;
    let id = parse_id(input, header.id_length)?;
    let payload = parse_payload(input, &header, &type_)?;

    Ok(NdefRecord {
        header,
        type_,
        id,
        payload,
    })
}

// private
fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_length = winnow::binary::u8.parse_next(input)?;

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        be_u32.parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(any.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format: NdefType::from_tnf(type_name_format),
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_type(input: &mut Stream<'_>, type_length: u8) -> ModalResult<Vec<u8>> {
    take(type_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

fn parse_id(input: &mut Stream<'_>, id_length: Option<u8>) -> ModalResult<Option<Vec<u8>>> {
    if let Some(id_len) = id_length {
        take(id_len as usize)
            .map(|s: &[u8]| Some(s.to_vec()))
            .parse_next(input)
    } else {
        Ok(None)
    }
}

fn parse_payload(
    input: &mut Stream<'_>,
    header: &NdefHeader,
    type_: &[u8],
) -> ModalResult<NdefPayload> {
    let payload = take(header.payload_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)?;

    Ok(crate::record::classify_payload(
        header.type_name_format,
        type_,
        payload,
    ))
}

//! Turns tag discovery events into notices for the user

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{event::TagEvent, notice::Notice};

#[uniffi::export(callback_interface)]
pub trait NoticeSink: Send + Sync + std::fmt::Debug + 'static {
    /// Show a single notice to the user
    fn show(&self, notice: Notice);
}

#[derive(Debug, Clone, uniffi::Object)]
pub struct TagDispatcher(Arc<Box<dyn NoticeSink>>);

#[uniffi::export]
impl TagDispatcher {
    #[uniffi::constructor]
    pub fn new(sink: Box<dyn NoticeSink>) -> Self {
        // one time init
        crate::logging::init();

        Self(Arc::new(sink))
    }

    /// Handle one event, every notice is sent to the sink in order and also returned
    pub fn handle(&self, event: TagEvent) -> Vec<Notice> {
        let notices = notices_for(&event);

        for notice in &notices {
            self.0.show(notice.clone());
        }

        notices
    }
}

/// Only the first message of an event is looked at
pub fn notices_for(event: &TagEvent) -> Vec<Notice> {
    let Some(action) = event.action.as_deref().filter(|action| !action.is_empty()) else {
        return vec![Notice::NullAction];
    };

    if !event.is_tag_discovered() {
        debug!("ignoring action {action}");
        return Vec::new();
    }

    let Some(messages) = &event.messages else {
        return vec![Notice::NullMessage];
    };

    let Some(message) = messages.first() else {
        return vec![Notice::EmptyMessage];
    };

    if message.is_empty() {
        return vec![Notice::EmptyRecord];
    }

    message
        .records
        .iter()
        .map(|record| match record.decode_text() {
            None => Notice::NotTextRecord,
            Some(Ok(text)) => Notice::Text(text),
            Some(Err(error)) => {
                warn!("skipping text record: {error}");
                Notice::DecodeFailed {
                    reason: error.to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use readrtd_nfc::{
        DecodedText, NdefMessage, NdefRecord, NdefType, TextPayloadFormat, encode_text_record,
    };

    use super::*;
    use crate::event::TAG_DISCOVERED_ACTION;

    #[derive(Debug, Default, Clone)]
    struct RecordingSink(Arc<Mutex<Vec<Notice>>>);

    impl NoticeSink for RecordingSink {
        fn show(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    fn text_record(text: &str, language_code: &str) -> NdefRecord {
        let payload = encode_text_record(text, language_code, TextPayloadFormat::Utf8).unwrap();
        NdefRecord::new(NdefType::WellKnown, b"T".to_vec(), payload)
    }

    fn decoded(text: &str, language_code: &str) -> Notice {
        Notice::Text(DecodedText {
            text: text.to_string(),
            language_code: language_code.to_string(),
            format: TextPayloadFormat::Utf8,
        })
    }

    #[test]
    fn missing_or_empty_action() {
        let event = TagEvent {
            action: None,
            messages: Some(vec![NdefMessage::new(vec![text_record("Hi", "en")])]),
        };
        assert_eq!(notices_for(&event), vec![Notice::NullAction]);

        let event = TagEvent {
            action: Some(String::new()),
            messages: None,
        };
        assert_eq!(notices_for(&event), vec![Notice::NullAction]);
    }

    #[test]
    fn other_actions_are_ignored() {
        let event = TagEvent {
            action: Some("android.nfc.action.NDEF_DISCOVERED".to_string()),
            messages: Some(vec![NdefMessage::new(vec![text_record("Hi", "en")])]),
        };

        assert!(notices_for(&event).is_empty());
    }

    #[test]
    fn empty_states() {
        let event = TagEvent {
            action: Some(TAG_DISCOVERED_ACTION.to_string()),
            messages: None,
        };
        assert_eq!(notices_for(&event), vec![Notice::NullMessage]);

        let event = TagEvent::discovered(Vec::new());
        assert_eq!(notices_for(&event), vec![Notice::EmptyMessage]);

        let event = TagEvent::discovered(vec![NdefMessage::default()]);
        assert_eq!(notices_for(&event), vec![Notice::EmptyRecord]);
    }

    #[test]
    fn one_notice_per_record_in_order() {
        let uri = NdefRecord::new(NdefType::WellKnown, b"U".to_vec(), b"\x04example.com".to_vec());
        let message = NdefMessage::new(vec![
            text_record("first", "en"),
            uri,
            text_record("二番目", "ja"),
        ]);

        let notices = notices_for(&TagEvent::discovered(vec![message]));

        assert_eq!(
            notices,
            vec![
                decoded("first", "en"),
                Notice::NotTextRecord,
                decoded("二番目", "ja"),
            ]
        );

        let shown = notices.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(shown, vec!["first(en)", "Not Text Record", "二番目(ja)"]);
    }

    #[test]
    fn only_first_message_is_used() {
        let event = TagEvent::discovered(vec![
            NdefMessage::new(vec![text_record("one", "en")]),
            NdefMessage::new(vec![text_record("two", "en")]),
        ]);

        assert_eq!(notices_for(&event), vec![decoded("one", "en")]);
    }

    #[test]
    fn bad_record_does_not_abort_batch() {
        let broken = NdefRecord::new(NdefType::WellKnown, b"T".to_vec(), Vec::new());
        let message = NdefMessage::new(vec![broken, text_record("ok", "en")]);

        let notices = notices_for(&TagEvent::discovered(vec![message]));

        assert_eq!(notices.len(), 2);
        assert!(matches!(notices[0], Notice::DecodeFailed { .. }));
        assert_eq!(notices[1], decoded("ok", "en"));
    }

    #[test]
    fn handle_sends_every_notice_to_sink() {
        let sink = RecordingSink::default();
        let dispatcher = TagDispatcher::new(Box::new(sink.clone()));

        let message = NdefMessage::new(vec![
            text_record("Hi", "en"),
            NdefRecord::new(NdefType::Mime, b"T".to_vec(), b"\x02enHi".to_vec()),
        ]);

        let returned = dispatcher.handle(TagEvent::discovered(vec![message]));
        let shown = sink.0.lock().clone();

        assert_eq!(returned, vec![decoded("Hi", "en"), Notice::NotTextRecord]);
        assert_eq!(shown, returned);
    }

    #[test]
    fn raw_tag_bytes_end_to_end() {
        let raw = vec![0xD1, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'H', b'i'];
        let event =
            TagEvent::from_raw_messages(Some(TAG_DISCOVERED_ACTION.to_string()), vec![raw])
                .unwrap();

        let notices = notices_for(&event);
        assert_eq!(notices, vec![decoded("Hi", "en")]);
        assert_eq!(notices[0].to_string(), "Hi(en)");
    }

    #[test]
    fn truncated_second_message_still_shows_first() {
        let valid = vec![0xD1, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'H', b'i'];
        let truncated = vec![0xD1, 0x01, 0x09, b'T', 0x02];

        let event = TagEvent::from_raw_messages(
            Some(TAG_DISCOVERED_ACTION.to_string()),
            vec![valid, truncated],
        )
        .unwrap();

        assert_eq!(notices_for(&event), vec![decoded("Hi", "en")]);
    }
}

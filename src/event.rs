use readrtd_nfc::{NdefMessage, NdefParseError, parse_ndef_message};
use tracing::warn;

/// The only action the dispatcher reacts to
pub const TAG_DISCOVERED_ACTION: &str = "android.nfc.action.TECH_DISCOVERED";

/// A tag discovery event as delivered by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct TagEvent {
    pub action: Option<String>,
    pub messages: Option<Vec<NdefMessage>>,
}

impl TagEvent {
    pub fn discovered(messages: Vec<NdefMessage>) -> Self {
        Self {
            action: Some(TAG_DISCOVERED_ACTION.to_string()),
            messages: Some(messages),
        }
    }

    /// Build an event from raw NDEF message bytes
    ///
    /// Only the first message is shown to the user, so only it has to parse. Later messages
    /// that do not parse are dropped with a warning.
    pub fn from_raw_messages(
        action: Option<String>,
        messages: Vec<Vec<u8>>,
    ) -> Result<Self, NdefParseError> {
        let mut raw = messages.iter();

        let Some(first) = raw.next() else {
            return Ok(Self {
                action,
                messages: Some(Vec::new()),
            });
        };

        let mut messages = vec![parse_ndef_message(first)?];
        for (index, message) in raw.enumerate() {
            match parse_ndef_message(message) {
                Ok(message) => messages.push(message),
                Err(error) => warn!("dropping message {}: {error}", index + 1),
            }
        }

        Ok(Self {
            action,
            messages: Some(messages),
        })
    }

    pub fn is_tag_discovered(&self) -> bool {
        self.action.as_deref() == Some(TAG_DISCOVERED_ACTION)
    }
}

#[uniffi::export]
fn tag_event_from_raw_messages(
    action: Option<String>,
    messages: Vec<Vec<u8>>,
) -> Result<TagEvent, NdefParseError> {
    TagEvent::from_raw_messages(action, messages)
}

use readrtd_nfc::DecodedText;

/// What the host shows the user, one per record, or one for an empty tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Enum, derive_more::Display)]
pub enum Notice {
    #[display("null action")]
    NullAction,

    #[display("Null Message")]
    NullMessage,

    #[display("Empty Message")]
    EmptyMessage,

    #[display("Empty Record")]
    EmptyRecord,

    #[display("Not Text Record")]
    NotTextRecord,

    /// Shown as `text(language)`
    #[display("{_0}")]
    Text(DecodedText),

    #[display("Invalid Text Record: {reason}")]
    DecodeFailed { reason: String },
}

#[uniffi::export]
fn notice_display(notice: Notice) -> String {
    notice.to_string()
}

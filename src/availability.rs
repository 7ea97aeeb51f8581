use tracing::warn;

/// State of the device NFC adapter, as seen by the host when the screen resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum NfcAvailability {
    Missing,
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, uniffi::Error)]
pub enum AvailabilityError {
    #[error("not found NFC feature")]
    NfcNotFound,

    #[error("NFC feature is not available")]
    NfcDisabled,
}

/// The host should show the error and close the screen when this fails
#[uniffi::export]
pub fn check_availability(availability: NfcAvailability) -> Result<(), AvailabilityError> {
    let error = match availability {
        NfcAvailability::Enabled => return Ok(()),
        NfcAvailability::Missing => AvailabilityError::NfcNotFound,
        NfcAvailability::Disabled => AvailabilityError::NfcDisabled,
    };

    warn!("nfc unavailable: {error}");
    Err(error)
}

pub(crate) mod logging;

pub mod availability;
pub mod dispatcher;
pub mod event;
pub mod notice;

pub use availability::{AvailabilityError, NfcAvailability, check_availability};
pub use dispatcher::{NoticeSink, TagDispatcher, notices_for};
pub use event::{TAG_DISCOVERED_ACTION, TagEvent};
pub use notice::Notice;

uniffi::setup_scaffolding!();

//! Client-side emergency button.
//!
//! The control carries no input of its own: each activation posts an empty
//! body to the backend's emergency endpoint using the session credential and
//! turns the outcome into a [`Notice`] for the patient.
//!
//! # Example
//!
//! ```no_run
//! use emergency_trigger::{EmergencyTrigger, Session};
//!
//! # async fn press() -> Result<(), emergency_trigger::TriggerError> {
//! let session = Session::new("https://api.prescripto.example", "patient-token")?;
//! let mut trigger = EmergencyTrigger::new()?;
//! let notice = trigger.activate(&session).await;
//! println!("{notice}");
//! # Ok(())
//! # }
//! ```

mod error;
mod notice;
mod session;
mod trigger;

pub use error::TriggerError;
pub use notice::{GENERIC_FAILURE_NOTICE, Notice, SUCCESS_NOTICE};
pub use session::{EMERGENCY_PATH, Session};
pub use trigger::{DEFAULT_TIMEOUT, EmergencyTrigger, TriggerStatus};

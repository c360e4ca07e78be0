//! Agora facility: hosts the governance and exchange engines.
//!
//! The facility is the single entry point for callers. It:
//! - Serialises every operation on an engine behind that engine's lock
//! - Supplies the current time from the injected clock
//! - Loads configuration and initialises logging
//! - Routes exchange ether payouts into the treasury when asked to

pub mod config;
pub mod error;
pub mod facility;

pub use config::FacilityConfig;
pub use error::FacilityError;
pub use facility::Facility;

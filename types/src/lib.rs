//! Fundamental types for the Agora facility.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! principals, governed item identifiers, timestamps, the clock seam, and tunable parameters.

pub mod address;
pub mod error;
pub mod item;
pub mod params;
pub mod time;

pub use address::Principal;
pub use error::TypesError;
pub use item::ItemId;
pub use params::{ExchangeParams, GovernanceParams, BPS_SCALE};
pub use time::{Clock, SystemClock, Timestamp};

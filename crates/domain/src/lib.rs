//! Ghostagotchi domain - entities, value objects, and progression rules
//!
//! Everything in this crate is pure: no IO, no clocks, no storage. Time is
//! always passed in by the caller so transitions stay deterministic and
//! testable.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export entities
pub use entities::{CareOutcome, Message, MessageSender, Pet, Profile, FEED_XP_GAIN, PLAY_XP_GAIN};

pub use error::DomainError;

// Re-export ID types
pub use ids::{MessageId, OwnerId, PetId};

// Re-export value objects
pub use value_objects::{age_label, Meter, PetName, Username};

//! Domain entities - Core business objects with identity

mod message;
mod pet;
mod profile;

pub use message::{Message, MessageSender};
pub use pet::{CareOutcome, Pet, FEED_XP_GAIN, PLAY_XP_GAIN};
pub use profile::Profile;

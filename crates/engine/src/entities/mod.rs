//! Entity modules - Domain capability encapsulation.
//!
//! Each module wraps operations for a domain entity type.
//! They depend on repository ports and provide the building blocks for use cases.

pub mod messages;
pub mod pets;
pub mod profiles;

pub use messages::Messages;
pub use pets::Pets;
pub use profiles::Profiles;

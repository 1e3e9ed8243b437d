//! Value objects - Immutable objects defined by their attributes

mod age;
mod meter;
mod names;

pub use age::age_label;
pub use meter::Meter;
pub use names::{PetName, Username};

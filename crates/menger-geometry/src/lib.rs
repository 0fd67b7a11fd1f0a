pub mod cube;
pub mod floor;
pub mod sponge;

pub use cube::Cube;
pub use floor::Floor;
pub use sponge::{build_level, MengerSponge};

//! Records returned by the ranking API.

mod battle;
mod location;
mod player;
mod tag;

pub use battle::*;
pub use location::*;
pub use player::*;
pub use tag::*;

pub mod deck;
pub mod index;
pub mod players;

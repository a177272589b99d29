pub mod announce;
pub mod card;
pub mod deal;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rank;
pub mod round;
pub mod suit;
pub mod trick;

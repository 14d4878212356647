use super::*;

mod endgame;
mod kiwipete;
mod promotions;
mod starting_position;

pub mod a001_team;
pub mod a002_player;
pub mod common;

pub mod errors;
pub mod kitsu;
pub mod mangadex;
pub mod views;

pub mod favorite;
pub mod place;

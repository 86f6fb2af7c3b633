pub mod player;
pub mod store;
pub mod validate;

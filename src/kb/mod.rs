pub mod defs;
pub mod loader;
pub mod store;

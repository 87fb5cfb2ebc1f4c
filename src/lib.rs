// Public library interface for parcelsplit-rs
// The binaries in src/main.rs and src/bin/ drive these modules

pub mod config;
pub mod geo;
pub mod layout;
pub mod lookup;
pub mod render;
pub mod site;

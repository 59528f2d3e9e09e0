pub mod lookup;
pub mod present;
pub mod principal;
pub mod schema;

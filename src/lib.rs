pub mod db;

pub mod auth;
pub mod centers;
pub mod constants;
pub mod errors;
pub mod notifications;
pub mod schema;
pub mod storage;
pub mod subscriptions;
pub mod transfers;
pub mod users;

pub use errors::{Error, Result};

mod config;
mod error;
mod pb;
mod types;
mod utils;

pub use config::*;
pub use error::Error;
pub use pb::*;
pub use types::*;
pub use utils::*;

pub type ReservationId = i32;
pub type UserId = i32;
pub type ResourceId = i32;

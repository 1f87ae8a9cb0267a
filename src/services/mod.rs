pub mod gift_service;
pub mod roll_service;
pub mod user_service;

pub use gift_service::*;
pub use roll_service::*;

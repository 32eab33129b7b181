pub mod error;
pub mod events;
pub mod health;
pub mod search;

pub use error::AppError;

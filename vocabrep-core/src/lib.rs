pub mod card;
pub mod clock;
pub mod config;
pub mod errors;
pub mod filters;
pub mod models;
pub mod repo;
pub mod scheduler;
pub mod service;
pub mod stats;

pub use card::*;
pub use clock::*;
pub use config::*;
pub use errors::*;
pub use filters::*;
pub use models::*;
pub use repo::*;
pub use scheduler::*;
pub use service::*;
pub use stats::*;

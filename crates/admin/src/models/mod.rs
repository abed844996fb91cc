//! Domain models for the admin API.

pub mod order;
pub mod preset;
pub mod user;

pub use order::{Order, OrderItem, OrderWithItems};
pub use preset::Preset;
pub use user::{User, UserSummary};

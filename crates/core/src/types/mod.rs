//! Validated domain types.

pub mod email;
pub mod id;
pub mod reset_code;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{OrderId, PresetId, UserId};
pub use reset_code::{ResetCode, ResetCodeError};
pub use status::{OrderStatus, PresetCategory, UnknownCategory};

//! Service layer: email delivery, token issuance, password hashing, and
//! asset storage.

pub mod assets;
pub mod email;
pub mod password;
pub mod token;

pub use assets::AssetStore;
pub use email::EmailService;
pub use token::TokenService;

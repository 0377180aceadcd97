/// Authentication module
///
/// Handles JWT token generation/validation, password hashing,
/// and persisted refresh-token records.
mod claims;
mod jwt;
mod password;
mod refresh_token;

pub use claims::Claims;
pub use jwt::generate_access_token;
pub use jwt::generate_refresh_token;
pub use jwt::validate_token;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::rotate_refresh_token;
pub use refresh_token::save_refresh_token;
pub use refresh_token::validate_refresh_token;

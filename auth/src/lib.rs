//! Credential primitives shared by account services
//!
//! - Password hashing (Argon2id, fixed cost)
//! - Identity tokens (HS256 JWT carrying account id and email)
//!
//! Services own their domain rules and adapt these building blocks behind their
//! own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::with_default_ttl(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue("account-1", "ada@example.com").unwrap();
//!
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.id, "account-1");
//! assert_eq!(claims.email, "ada@example.com");
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::IdentityClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenService;

//! Bearer-token verification. Tokens are minted by the identity provider;
//! this service only checks them and exposes the caller's ID.

mod claims;
pub mod jwt;

pub use jwt::AuthUser;

//! Serialization of geometry to various storage formats.

#[cfg(feature = "ser_ply")]
pub mod ply;

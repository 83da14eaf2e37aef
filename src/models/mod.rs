//! Modelos de datos
//!
//! Structs que mapean a las tablas de PostgreSQL.

pub mod company;
pub mod otp;
pub mod user;

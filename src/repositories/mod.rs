//! Acceso a datos por entidad

pub mod company_repository;
pub mod otp_repository;
pub mod user_repository;

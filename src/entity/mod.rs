//! SeaORM entity definitions for PostgreSQL database.

pub mod company_rating;
pub mod job_application;
pub mod job_preference;
pub mod resume;

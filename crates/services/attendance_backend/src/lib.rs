// File: services/attendance_backend/src/lib.rs
pub mod service_factory;

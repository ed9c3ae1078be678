// rollbook-api: Async Rust client for the student records service

pub mod auth;
pub mod birthday;
pub mod client;
pub mod error;
pub mod models;
pub mod student;
pub mod transport;

pub use client::RecordsClient;
pub use error::Error;
pub use models::{AcademicInfo, BasicInfo, LoginRequest, LoginResult, StudentDetails, Subject};
pub use transport::{TlsMode, TransportConfig};

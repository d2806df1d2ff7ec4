//! Request / response DTOs for the HTTP surface.

pub mod message;

pub use message::{ApiResponse, MessageResponse, SubmitMessageRequest};

//! Gemini `generateContent` client
//!
//! HTTP client configuration lives in `client`, wire types in `models`.

pub mod client;
pub mod models;

pub use client::{Client, ClientConfig, ClientError};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

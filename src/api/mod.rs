//! Strapi REST API access

mod client;
mod error;

pub use client::StrapiClient;
pub use error::ApiError;

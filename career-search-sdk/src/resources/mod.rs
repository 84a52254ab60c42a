//! API resource clients
//!
//! Each resource groups the operations for one area of the backend API
//! behind a small client that shares the underlying [`HttpClient`].
//!
//! [`HttpClient`]: crate::client::HttpClient

pub mod jobs;

pub use jobs::{JobDetails, JobsClient};

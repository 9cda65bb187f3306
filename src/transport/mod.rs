//! Search transport module
//!
//! Defines the SearchTransport trait with a GitHub implementation and an
//! in-memory fake.

mod traits;

pub mod fake;
pub mod github;

pub use fake::FakeTransport;
pub use github::GitHubTransport;
pub use traits::*;

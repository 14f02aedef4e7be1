//! Core library for the readability parser client
//!
//! This crate implements the **Functional Core** of the readability client,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`readability_core`** (this crate): Pure transformation functions with zero I/O
//! - **`readability`**: HTTP requests, observers, CLI and MCP server (the Imperative Shell)
//!
//! All functions in this crate are pure: the same input always produces the same
//! output, and they can be tested with simple fixture data, no mocking required.
//!
//! # Module Organization
//!
//! - [`error`]: The error taxonomy every parse failure is reported with
//! - [`parser`]: Request URL construction, status classification and body decoding
//! - [`summary`]: Projection of a parsed article into the fields the CLI displays
//!
//! # Example Usage
//!
//! ```rust
//! use readability_core::parser::{build_parser_url, DEFAULT_BASE_URL};
//!
//! let url = build_parser_url(DEFAULT_BASE_URL, "TESTKEY", "http://example.com/x");
//!
//! assert_eq!(
//!     url,
//!     "https://www.readability.com/api/content/v1/parser?token=TESTKEY&url=http%3A%2F%2Fexample.com%2Fx"
//! );
//! ```

pub mod error;
pub mod parser;
pub mod summary;

pub use error::{ErrorKind, ParseError};
pub use parser::{Article, ParseResult};

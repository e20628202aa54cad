//! Open Library Books / Covers / Read / RecentChanges API 클라이언트
//!
//! ```no_run
//! use openlibrary_client::api::{BooksClient, BooksRequest};
//! use openlibrary_client::transport::HttpTransport;
//!
//! let client = BooksClient::new(HttpTransport::new()?);
//! let request = BooksRequest::builder()
//!     .bibkey("ISBN", "0451526538")
//!     .jscmd("data")
//!     .build()?;
//! let body = client.request(&request, true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod api;
pub mod configs;
pub mod error;
pub mod grammar;
pub mod response;
pub mod transport;

pub use api::OpenLibrary;
pub use error::{ClientError, RequestError, TransportError};
pub use response::Body;
pub use transport::{HttpTransport, ReadMode, Transport};

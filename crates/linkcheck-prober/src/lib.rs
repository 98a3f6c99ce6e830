//! Link availability prober.
//!
//! [`normalize`] turns raw user input into a validated `http`/`https` URL and
//! [`HttpProber`] probes it with a HEAD request, falling back to GET for
//! servers that refuse HEAD.

pub mod error;
pub mod http;
pub mod normalize;

pub use error::ProberError;
pub use http::{HttpProber, ProberSettings};
pub use normalize::normalize;

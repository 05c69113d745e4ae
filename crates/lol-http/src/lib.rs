//! HTTP plumbing for the game client's local APIs.
//!
//! Both the Replay API and the LCU control plane are served over HTTPS on
//! 127.0.0.1 with self-signed certificates. [`RequestClient`] owns the retry
//! policy for either; [`LcuClient`] adds lockfile-derived Basic auth on top, and
//! [`RiotClient`] reuses it against the Riot Client launcher's lockfile.

mod client;
mod error;
mod lcu;
pub mod lockfile;
mod riot;
#[cfg(test)]
mod testing;
mod transport;

pub use client::{Reply, RequestClient, DEFAULT_BASE_DELAY};
pub use error::{ErrorKind, HttpError};
pub use lcu::{authorization_header, LcuClient, LCU_DEFAULT_RETRIES, LCU_REPLAY_RETRIES};
pub use lockfile::LockfileResolver;
pub use reqwest::Method;
pub use riot::RiotClient;
pub use transport::{RawResponse, ReqwestTransport, Request, Transport, TransportFailure};

/// Loopback host both local APIs listen on
pub const LOCAL_HOST: &str = "127.0.0.1";

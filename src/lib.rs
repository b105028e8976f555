//! Status queries for Quake3-derived game servers (CPMA/Promode and
//! friends) over the connectionless `getstatus`/`statusResponse` UDP
//! exchange.
//!
//! One query sends the fixed 14-byte request datagram, waits for a single
//! reply bounded by a timeout, validates the 19-byte `statusResponse`
//! framing, and parses the backslash-delimited body into typed game data
//! plus an ordered player list. Every failure is reported as the target's
//! [`QueryOutcome`]; nothing panics and nothing aborts a batch.
//!
//! Both a blocking querier ([`query`], [`query_many`]) and an async one on
//! the tokio runtime ([`tokio::query`], [`tokio::query_many`]) are
//! provided. The async batch runs all targets concurrently with
//! independent timeouts while preserving input order in the results.

pub mod packet;
pub mod resolve;
pub mod status;
pub mod tokio;

mod error;
mod query;

pub use error::{QueryError, QueryOutcome};
pub use query::{query, query_many, Target};
pub use status::{PlayerRecord, ServerInfo, Value};

//! Query failures, surfaced as data so batch results never abort.

use thiserror::Error;

/// Everything that can go wrong with one target's query. Each variant
/// carries the target it belongs to, so a batch outcome is self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Port outside 0..=65535, detected before any network I/O.
    #[error("Invalid port {address}:{port}")]
    InvalidPort { address: String, port: u32 },

    /// Input was neither a literal IPv4 address nor a resolvable hostname.
    #[error("Can't get ipv4 from address {address}")]
    UnresolvableAddress { address: String },

    /// No reply arrived before the timeout, or the transport failed.
    #[error("Server {address}:{port} doesn't response")]
    NoResponse { address: String, port: u32 },

    /// The reply failed header/body framing checks or did not parse.
    #[error("Response error from server {address}:{port}. Maybe this game doesn't supports?")]
    MalformedResponse { address: String, port: u32 },
}

/// Result of one query: a parsed [`ServerInfo`](crate::ServerInfo) or the
/// error that stopped it. Exactly one outcome per target, always.
pub type QueryOutcome = Result<crate::ServerInfo, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let cases = vec![
            (
                QueryError::InvalidPort {
                    address: "10.0.0.1".to_string(),
                    port: 70000,
                },
                "Invalid port 10.0.0.1:70000",
            ),
            (
                QueryError::UnresolvableAddress {
                    address: "nowhere.invalid".to_string(),
                },
                "Can't get ipv4 from address nowhere.invalid",
            ),
            (
                QueryError::NoResponse {
                    address: "10.0.0.1".to_string(),
                    port: 27960,
                },
                "Server 10.0.0.1:27960 doesn't response",
            ),
            (
                QueryError::MalformedResponse {
                    address: "10.0.0.1".to_string(),
                    port: 27960,
                },
                "Response error from server 10.0.0.1:27960. Maybe this game doesn't supports?",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }
}

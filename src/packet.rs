//! Wire format of the getstatus exchange: fixed request/response framing

/// Request datagram sent to the server: connectionless prefix + "getstatus" + NUL.
pub const QUERY_PACKET: &[u8] = b"\xff\xff\xff\xffgetstatus\x00";

/// Header every valid reply starts with: connectionless prefix + "statusResponse\n".
pub const RESPONSE_HEADER: &[u8] = b"\xff\xff\xff\xffstatusResponse\n";

/// Length of [`RESPONSE_HEADER`], the split point between header and body.
pub const HEADER_LEN: usize = 19;

/// Splits a reply datagram into its 19-byte header and the remaining body.
/// Returns `None` when the datagram is too short to even hold the header.
pub fn split_packet(datagram: &[u8]) -> Option<(&[u8], &[u8])> {
    if datagram.len() < HEADER_LEN {
        return None;
    }
    Some(datagram.split_at(HEADER_LEN))
}

/// Exact byte match against the statusResponse header.
pub fn is_valid_header(header: &[u8]) -> bool {
    header == RESPONSE_HEADER
}

/// A well-formed body starts with a backslash and holds an even number of
/// backslashes (keys and values are backslash-delimited, so an odd count
/// means the body was truncated or corrupted).
pub fn is_valid_body(body: &[u8]) -> bool {
    body.starts_with(b"\\") && body.iter().filter(|&&b| b == b'\\').count() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_packet_is_constant() {
        assert_eq!(QUERY_PACKET, b"\xff\xff\xff\xffgetstatus\x00");
        assert_eq!(QUERY_PACKET.len(), 14);
        assert_eq!(&QUERY_PACKET[..4], &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(QUERY_PACKET[13], 0x00);
    }

    #[test]
    fn response_header_is_19_bytes() {
        assert_eq!(RESPONSE_HEADER.len(), HEADER_LEN);
        assert_eq!(&RESPONSE_HEADER[4..], b"statusResponse\n");
    }

    #[test]
    fn split_packet_roundtrip() {
        let mut datagram = RESPONSE_HEADER.to_vec();
        datagram.extend_from_slice(b"\\mapname\\cpm22\n");

        let (header, body) = split_packet(&datagram).unwrap();
        assert_eq!(header.len(), HEADER_LEN);
        assert_eq!(body, b"\\mapname\\cpm22\n");

        let mut rebuilt = header.to_vec();
        rebuilt.extend_from_slice(body);
        assert_eq!(rebuilt, datagram);
    }

    #[test]
    fn split_packet_exact_header_length() {
        let (header, body) = split_packet(RESPONSE_HEADER).unwrap();
        assert_eq!(header, RESPONSE_HEADER);
        assert!(body.is_empty());
    }

    #[test]
    fn split_packet_rejects_short_datagrams() {
        assert!(split_packet(b"").is_none());
        assert!(split_packet(b"\xff\xff\xff\xffstatus").is_none());
        assert!(split_packet(&RESPONSE_HEADER[..HEADER_LEN - 1]).is_none());
    }

    #[test]
    fn header_validation_is_exact() {
        assert!(is_valid_header(RESPONSE_HEADER));
        assert!(!is_valid_header(b"\xff\xff\xff\xffstatusResponse"));
        assert!(!is_valid_header(b"\xff\xff\xff\xffprint\nstatusRes"));
        assert!(!is_valid_header(QUERY_PACKET));
        assert!(!is_valid_header(b""));
    }

    #[test]
    fn body_validation_checks_backslash_parity() {
        assert!(is_valid_body(b"\\key\\value"));
        assert!(is_valid_body(b"\\sv_hostname\\Pickup\\mapname\\cpm22"));
        // odd backslash count
        assert!(!is_valid_body(b"\\key\\value\\"));
        assert!(!is_valid_body(b"\\truncated"));
        // must start with a backslash
        assert!(!is_valid_body(b"key\\value"));
        assert!(!is_valid_body(b""));
    }
}

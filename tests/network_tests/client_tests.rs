//! Tests for Client
//!
//! These tests verify:
//! - Request bytes written per search
//! - Deadline handling (zero means none)
//! - Decoding over the buffered connection
//! - Error propagation from the stream

#[path = "../common/mod.rs"]
mod common;

use std::cell::RefCell;
use std::io::{self, Cursor, Read, Write};
use std::time::Duration;

use common::{lookup, respond, three_records, ResponseBuilder};
use datsearch::network::{Client, SharedClient, Transport};
use datsearch::protocol::{ByteOrder, Codec, SearchMode};
use datsearch::SearchError;

// =============================================================================
// Helper Types
// =============================================================================

/// In-memory connection: canned server bytes in, client bytes out
struct MockStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    read_deadlines: RefCell<Vec<Option<Duration>>>,
    write_deadlines: RefCell<Vec<Option<Duration>>>,
    read_error: Option<io::ErrorKind>,
}

impl MockStream {
    fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
            output: Vec::new(),
            read_deadlines: RefCell::new(Vec::new()),
            write_deadlines: RefCell::new(Vec::new()),
            read_error: None,
        }
    }

    fn failing_reads(kind: io::ErrorKind) -> Self {
        Self {
            read_error: Some(kind),
            ..Self::new(Vec::new())
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_error {
            Some(kind) => Err(io::Error::new(kind, "mock read failure")),
            None => self.input.read(buf),
        }
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for MockStream {
    fn set_read_deadline(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.read_deadlines.borrow_mut().push(timeout);
        Ok(())
    }

    fn set_write_deadline(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.write_deadlines.borrow_mut().push(timeout);
        Ok(())
    }
}

fn client_with(order: ByteOrder, input: Vec<u8>) -> Client<MockStream> {
    Client::new(MockStream::new(input), Codec::new(order))
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_search_writes_request_frame() {
    let order = ByteOrder::Little;
    let mut client = client_with(order, ResponseBuilder::new(order).end().build());

    let occurrences = client.search("abc", SearchMode::ALL).unwrap();
    assert!(occurrences.is_empty());

    let stream = client.into_inner();
    assert_eq!(stream.output, vec![0x07, 0x03, 0x00, 0x00, 0x00, b'a', b'b', b'c']);
}

#[test]
fn test_search_decodes_occurrences() {
    let order = ByteOrder::Big;
    let mode = SearchMode::NEEDLE | SearchMode::USER_DATA;
    let mut client = client_with(order, three_records(order, mode));

    let occurrences = client.search("ushers", mode).unwrap();

    let needles: Vec<String> = occurrences
        .iter()
        .map(|o| o.needle.as_ref().unwrap().to_string_lossy(order))
        .collect();
    assert_eq!(needles, vec!["he", "she", "hers"]);
}

#[test]
fn test_sequential_searches_share_buffer() {
    let order = ByteOrder::Little;
    let mode = SearchMode::NEEDLE | SearchMode::USER_DATA;

    let mut input = respond(order, mode, &lookup("ushers"));
    input.extend(respond(order, mode, &lookup("xyz")));
    input.extend(respond(order, mode, &lookup("his")));
    let mut client = client_with(order, input);

    assert_eq!(client.search("ushers", mode).unwrap().len(), 3);
    assert!(client.search("xyz", mode).unwrap().is_empty());
    let last = client.search("his", mode).unwrap();
    assert_eq!(last.first().unwrap().data_value, b"possessive");

    let written = client.into_inner().output;
    assert_eq!(written.len(), (5 + 6) + (5 + 3) + (5 + 3));
}

#[test]
fn test_query_uses_client_mode() {
    let order = ByteOrder::Little;
    let mode = SearchMode::FIRST | SearchMode::USER_DATA;
    let mut client = client_with(order, respond(order, mode, &lookup("she"))).with_mode(mode);

    let occurrences = client.query("she").unwrap();

    assert_eq!(client.mode(), mode);
    assert_eq!(occurrences.len(), 1);
    assert_eq!(client.into_inner().output[0], mode.bits());
}

#[test]
fn test_send_and_receive_separately() {
    let order = ByteOrder::Little;
    let mut client = client_with(order, ResponseBuilder::new(order).record(b"v").end().build());

    client.send_search("k", SearchMode::USER_DATA, None).unwrap();
    let occurrences = client
        .receive_occurrences(SearchMode::USER_DATA, None)
        .unwrap();

    assert_eq!(occurrences.first().unwrap().data_value, b"v");
}

// =============================================================================
// Deadline Tests
// =============================================================================

#[test]
fn test_zero_deadline_means_none() {
    let order = ByteOrder::Little;
    let mut client = client_with(order, ResponseBuilder::new(order).end().build());

    client
        .send_search("x", SearchMode::NONE, Some(Duration::ZERO))
        .unwrap();
    client
        .receive_occurrences(SearchMode::NONE, Some(Duration::ZERO))
        .unwrap();

    let stream = client.get_ref();
    assert_eq!(*stream.write_deadlines.borrow(), vec![None]);
    assert_eq!(*stream.read_deadlines.borrow(), vec![None]);
}

#[test]
fn test_deadlines_applied_per_call() {
    let order = ByteOrder::Little;
    let mut client = client_with(order, ResponseBuilder::new(order).end().build());

    client
        .send_search("x", SearchMode::NONE, Some(Duration::from_millis(250)))
        .unwrap();
    client
        .receive_occurrences(SearchMode::NONE, Some(Duration::from_secs(2)))
        .unwrap();

    let stream = client.get_ref();
    assert_eq!(
        *stream.write_deadlines.borrow(),
        vec![Some(Duration::from_millis(250))]
    );
    assert_eq!(
        *stream.read_deadlines.borrow(),
        vec![Some(Duration::from_secs(2))]
    );
}

#[test]
fn test_search_uses_configured_timeouts() {
    let order = ByteOrder::Little;
    let mut input = ResponseBuilder::new(order).end().build();
    input.extend(ResponseBuilder::new(order).end().build());
    let mut client = client_with(order, input)
        .with_timeouts(Some(Duration::from_millis(10)), None);

    client.search("a", SearchMode::NONE).unwrap();
    client.search("b", SearchMode::NONE).unwrap();

    let stream = client.get_ref();
    assert_eq!(
        *stream.read_deadlines.borrow(),
        vec![Some(Duration::from_millis(10)); 2]
    );
    assert_eq!(*stream.write_deadlines.borrow(), vec![None, None]);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_read_timeout_surfaces_as_timeout() {
    let mut client = Client::new(
        MockStream::failing_reads(io::ErrorKind::WouldBlock),
        Codec::new(ByteOrder::Little),
    );

    let err = client.search("x", SearchMode::ALL).unwrap_err();
    assert!(err.is_timeout());
}

#[test]
fn test_reset_connection_surfaces_as_io() {
    let mut client = Client::new(
        MockStream::failing_reads(io::ErrorKind::ConnectionReset),
        Codec::new(ByteOrder::Little),
    );

    let err = client.search("x", SearchMode::ALL).unwrap_err();
    assert!(matches!(err, SearchError::Io(_)));
}

#[test]
fn test_truncated_response_discards_partial_result() {
    let order = ByteOrder::Little;
    let mode = SearchMode::USER_DATA;
    let mut full = three_records(order, mode);
    full.truncate(full.len() - 2);
    let mut client = client_with(order, full);

    let err = client.search("ushers", mode).unwrap_err();
    assert!(err.is_short_read());
}

// =============================================================================
// Shared Client Tests
// =============================================================================

#[test]
fn test_shared_client_clones_use_one_connection() {
    let order = ByteOrder::Little;
    let mode = SearchMode::USER_DATA;
    let mut input = respond(order, mode, &lookup("he"));
    input.extend(respond(order, mode, &lookup("his")));

    let shared = SharedClient::new(client_with(order, input).with_mode(mode));
    let other = shared.clone();

    assert_eq!(shared.query("he").unwrap().len(), 1);
    assert_eq!(other.search("his", mode).unwrap().len(), 1);

    assert!(shared.try_unwrap().is_err());
    let client = other.try_unwrap().ok().unwrap();
    assert_eq!(client.into_inner().output.len(), (5 + 2) + (5 + 3));
}

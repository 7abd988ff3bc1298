//! Search Client
//!
//! Runs search exchanges over a single connection.

use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::transport::{Stream, Transport};
use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Codec, Occurrences, SearchMode};

/// Client for one connection to a search server
///
/// Each search is one request frame followed by one response stream. A
/// request must not be sent while the previous response is still unread.
/// After any error the connection state is unknown and it should be dropped.
pub struct Client<S: Transport = Stream> {
    /// Stream reader (buffered for efficiency); writes go to the inner stream
    reader: BufReader<S>,

    /// Byte order and field limits
    codec: Codec,

    /// Mode used by `query`
    mode: SearchMode,

    /// Deadlines used by `search` and `query`
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Client<Stream> {
    /// Connect to the endpoint named in `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let stream = Stream::connect(&config.endpoint)?;
        Ok(Client::new(stream, config.codec())
            .with_mode(config.search_mode)
            .with_timeouts(config.read_timeout(), config.write_timeout()))
    }
}

impl<S: Transport> Client<S> {
    /// Wrap an already connected stream
    pub fn new(stream: S, codec: Codec) -> Self {
        Self {
            reader: BufReader::new(stream),
            codec,
            mode: SearchMode::ALL,
            read_timeout: None,
            write_timeout: None,
        }
    }

    /// Set the mode `query` searches with
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the deadlines `search` applies to each read and write
    pub fn with_timeouts(mut self, read: Option<Duration>, write: Option<Duration>) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    /// Send one search request
    ///
    /// A zero or absent `deadline` makes the write block.
    pub fn send_search(
        &mut self,
        needle: &str,
        mode: SearchMode,
        deadline: Option<Duration>,
    ) -> Result<()> {
        let stream = self.reader.get_mut();
        stream.set_write_deadline(effective(deadline))?;
        self.codec.write_request(stream, needle.as_bytes(), mode)?;

        tracing::trace!("Sent search for {} bytes (mode {})", needle.len(), mode);
        Ok(())
    }

    /// Receive the occurrences answering the last request
    ///
    /// `mode` must be the one the request was sent with. The deadline bounds
    /// each individual read, not the whole response.
    pub fn receive_occurrences(
        &mut self,
        mode: SearchMode,
        deadline: Option<Duration>,
    ) -> Result<Occurrences> {
        self.reader.get_ref().set_read_deadline(effective(deadline))?;
        let occurrences = self.codec.read_occurrences(&mut self.reader, mode)?;

        tracing::trace!("Received {} occurrences (mode {})", occurrences.len(), mode);
        Ok(occurrences)
    }

    /// Send a search and read its occurrences with the configured deadlines
    pub fn search(&mut self, needle: &str, mode: SearchMode) -> Result<Occurrences> {
        self.send_search(needle, mode, self.write_timeout)?;
        self.receive_occurrences(mode, self.read_timeout)
    }

    /// Search with the client's own mode
    pub fn query(&mut self, needle: &str) -> Result<Occurrences> {
        self.search(needle, self.mode)
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }

    /// Unwrap the stream, dropping any bytes buffered but not yet decoded
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}

fn effective(deadline: Option<Duration>) -> Option<Duration> {
    deadline.filter(|d| !d.is_zero())
}

/// Client that can be shared between threads
///
/// Each `search` holds the connection for the whole request and response,
/// so concurrent callers are served one at a time in lock order.
pub struct SharedClient<S: Transport = Stream> {
    inner: Arc<Mutex<Client<S>>>,
}

impl<S: Transport> SharedClient<S> {
    pub fn new(client: Client<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn search(&self, needle: &str, mode: SearchMode) -> Result<Occurrences> {
        self.inner.lock().search(needle, mode)
    }

    pub fn query(&self, needle: &str) -> Result<Occurrences> {
        self.inner.lock().query(needle)
    }

    /// Take the client back once no other handle exists
    pub fn try_unwrap(self) -> std::result::Result<Client<S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl<S: Transport> Clone for SharedClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

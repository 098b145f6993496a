//! Transport layer for tag communication
//!
//! This module provides the trait implemented by concrete reader transports.

use bytes::Bytes;
use std::fmt;
use tracing::{debug, trace};

use crate::{Command, Error, Response};

/// Trait for reader transport connections
///
/// Implementors must provide methods for raw transmit and reset; `transmit`
/// and `send` are provided on top with tracing.
pub trait CardTransport: fmt::Debug + Send {
    /// Send raw command bytes and get the raw response, without logging
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error>;

    /// Check whether a card is currently connected
    fn is_connected(&self) -> bool;

    /// Reset the transport
    fn reset(&mut self) -> Result<(), Error>;

    /// Send raw command bytes and get the raw response
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        trace!(command = %hex::encode(command), "Transmitting command");
        let response = self.do_transmit_raw(command);
        match &response {
            Ok(bytes) => trace!(response = %hex::encode(bytes), "Received response"),
            Err(err) => debug!(error = ?err, "Error during transmission"),
        }
        response
    }

    /// Send a [`Command`] and parse the reply into a [`Response`]
    fn send(&mut self, command: &Command) -> Result<Response, Error> {
        let response = self.transmit_raw(&command.to_bytes())?;
        Response::from_bytes(&response)
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;

#[cfg(test)]
mod mock {
    use super::*;

    /// Mock transport for testing, returning a fixed response
    #[derive(Debug)]
    pub(crate) struct MockTransport {
        pub response: Bytes,
    }

    impl MockTransport {
        pub(crate) const fn with_response(response: Bytes) -> Self {
            Self { response }
        }
    }

    impl CardTransport for MockTransport {
        fn do_transmit_raw(&mut self, _command: &[u8]) -> Result<Bytes, Error> {
            Ok(self.response.clone())
        }

        fn is_connected(&self) -> bool {
            true
        }

        fn reset(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_parses_response() {
        let mut transport =
            MockTransport::with_response(Bytes::from_static(&[0x04, 0xA1, 0x90, 0x00]));
        let response = transport.send(&Command::new_with_le(0xFF, 0xCA, 0x00, 0x00, 0x00)).unwrap();
        assert!(response.is_success());
        assert_eq!(response.payload().as_ref(), &[0x04, 0xA1]);
    }
}

//! Command definitions for reader operations
//!
//! Contactless readers expose storage-card operations as APDU-shaped
//! commands (ISO/IEC 7816-4 framing, PC/SC part 3 semantics), so the wire
//! unit is the classic CLA/INS/P1/P2 header with optional data and an
//! optional expected length.

use bytes::{BufMut, Bytes, BytesMut};

use crate::Error;

/// Expected length type for commands
pub type ExpectedLength = u8;

/// Generic command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected length (optional)
    pub le: Option<ExpectedLength>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Create a new command with expected response length (Le)
    pub const fn new_with_le(cla: u8, ins: u8, p1: u8, p2: u8, le: ExpectedLength) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: Some(le),
        }
    }

    /// Create a new command with data payload
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: None,
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the expected length field
    pub const fn with_le(mut self, le: ExpectedLength) -> Self {
        self.le = Some(le);
        self
    }

    /// Calculate length of the serialized command
    pub fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;
        if let Some(data) = &self.data {
            length += 1 + data.len();
        }
        if self.le.is_some() {
            length += 1;
        }
        length
    }

    /// Convert to raw command bytes
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.cla);
        buffer.put_u8(self.ins);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);

        // Add Lc and data if present
        if let Some(data) = &self.data {
            buffer.put_u8(data.len() as u8);
            buffer.put_slice(data);
        }

        // Add Le if present
        if let Some(le) = self.le {
            buffer.put_u8(le);
        }

        buffer.freeze()
    }

    /// Parse a command from raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < 4 {
            return Err(Error::InvalidCommandLength(data.len()));
        }

        let mut command = Self::new(data[0], data[1], data[2], data[3]);

        if data.len() > 4 {
            let lc = data[4] as usize;

            if data.len() == 5 {
                // Only Le present, no data
                command.le = Some(data[4]);
            } else if data.len() >= 5 + lc {
                if lc > 0 {
                    command.data = Some(Bytes::copy_from_slice(&data[5..5 + lc]));
                }

                // Check for Le
                if data.len() > 5 + lc {
                    if data.len() == 5 + lc + 1 {
                        command.le = Some(data[5 + lc]);
                    } else {
                        return Err(Error::InvalidCommandLength(data.len()));
                    }
                }
            } else {
                return Err(Error::InvalidCommandLength(data.len()));
            }
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let data = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        let cmd = Command::new_with_data(0xFF, 0x82, 0x00, 0x00, data);
        let bytes = cmd.to_bytes();

        assert_eq!(bytes[0], 0xFF); // CLA
        assert_eq!(bytes[1], 0x82); // INS
        assert_eq!(bytes[2], 0x00); // P1
        assert_eq!(bytes[3], 0x00); // P2
        assert_eq!(bytes[4], 0x06); // Lc (data length)
        assert_eq!(&bytes[5..11], &[0xFF; 6]);
        assert_eq!(bytes.len(), 11);
    }

    #[test]
    fn test_command_length() {
        let cmd1 = Command::new(0xFF, 0xB0, 0x00, 0x04);
        assert_eq!(cmd1.command_length(), 4);

        let cmd2 = Command::new_with_le(0xFF, 0xB0, 0x00, 0x04, 0x10);
        assert_eq!(cmd2.command_length(), 5);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03, 0x04]);
        let cmd3 = Command::new_with_data(0xFF, 0xD6, 0x00, 0x04, data.clone());
        assert_eq!(cmd3.command_length(), 9);

        let cmd4 = Command::new_with_data(0xFF, 0xD6, 0x00, 0x04, data).with_le(0x00);
        assert_eq!(cmd4.command_length(), 10);
    }

    #[test]
    fn test_command_from_bytes() {
        // Header only
        let cmd = Command::from_bytes(&[0xFF, 0xCA, 0x00, 0x00]).unwrap();
        assert_eq!(cmd.cla, 0xFF);
        assert_eq!(cmd.ins, 0xCA);
        assert!(cmd.data.is_none());
        assert!(cmd.le.is_none());

        // Header with Le only
        let cmd = Command::from_bytes(&[0xFF, 0xCA, 0x00, 0x00, 0x00]).unwrap();
        assert!(cmd.data.is_none());
        assert_eq!(cmd.le.unwrap(), 0x00);

        // Header with data
        let cmd = Command::from_bytes(&[0xFF, 0xD6, 0x00, 0x04, 0x02, 0xAA, 0xBB]).unwrap();
        assert_eq!(cmd.data.as_ref().unwrap(), &[0xAA, 0xBB].as_ref());
        assert!(cmd.le.is_none());

        // Header with data and Le
        let cmd = Command::from_bytes(&[0xFF, 0xD6, 0x00, 0x04, 0x02, 0xAA, 0xBB, 0x10]).unwrap();
        assert_eq!(cmd.data.as_ref().unwrap(), &[0xAA, 0xBB].as_ref());
        assert_eq!(cmd.le.unwrap(), 0x10);

        // Too short
        assert!(Command::from_bytes(&[0xFF, 0xCA]).is_err());

        // Truncated data
        assert!(Command::from_bytes(&[0xFF, 0xD6, 0x00, 0x04, 0x05, 0xAA]).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let cases = [
            Command::new(0xFF, 0xCA, 0x00, 0x00),
            Command::new_with_le(0xFF, 0xB0, 0x00, 0x04, 0x10),
            Command::new_with_data(0xFF, 0xD6, 0x00, 0x04, Bytes::from_static(&[1, 2, 3, 4])),
            Command::new_with_data(0xFF, 0x86, 0x00, 0x00, Bytes::from_static(&[1, 0, 4, 0x60, 0]))
                .with_le(0x00),
        ];

        for cmd in cases {
            let parsed = Command::from_bytes(&cmd.to_bytes()).unwrap();
            assert_eq!(parsed, cmd);
        }
    }
}

//! Argument payload of a BETWEEN predicate
//!
//! Wire form: `start_len (u32, big-endian) ++ start ++ stop`. Both ends are
//! inclusive.

use crate::errors::{HaloError, HaloResult};

const LENGTH_WIDTH: usize = 4;

/// Start and stop literals of `column BETWEEN start AND stop`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetweenArguments {
    /// Inclusive lower literal
    pub start: Vec<u8>,
    /// Inclusive upper literal
    pub stop: Vec<u8>,
}

impl BetweenArguments {
    pub fn new(start: impl Into<Vec<u8>>, stop: impl Into<Vec<u8>>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
        }
    }

    /// Serializes into the length-prefixed wire form
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LENGTH_WIDTH + self.start.len() + self.stop.len());
        out.extend_from_slice(&(self.start.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.start);
        out.extend_from_slice(&self.stop);
        out
    }

    /// Parses the wire form, rejecting truncated payloads
    pub fn from_bytes(payload: &[u8]) -> HaloResult<Self> {
        if payload.len() < LENGTH_WIDTH {
            return Err(HaloError::invalid_argument(format!(
                "BETWEEN payload of {} bytes has no length header",
                payload.len()
            )));
        }

        let mut header = [0u8; LENGTH_WIDTH];
        header.copy_from_slice(&payload[..LENGTH_WIDTH]);
        let start_len = u32::from_be_bytes(header) as usize;

        let body = &payload[LENGTH_WIDTH..];
        if start_len > body.len() {
            return Err(HaloError::invalid_argument(format!(
                "BETWEEN start length {} exceeds payload of {} bytes",
                start_len,
                body.len()
            )));
        }

        Ok(Self {
            start: body[..start_len].to_vec(),
            stop: body[start_len..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        let args = BetweenArguments::new("10", "110");
        let bytes = args.to_bytes();
        assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[4..], b"10110");
        assert_eq!(BetweenArguments::from_bytes(&bytes).unwrap(), args);
    }

    #[test]
    fn test_empty_values() {
        let args = BetweenArguments::new("", "");
        assert_eq!(args.to_bytes(), vec![0, 0, 0, 0]);
        assert_eq!(BetweenArguments::from_bytes(&[0, 0, 0, 0]).unwrap(), args);
    }

    #[test]
    fn test_truncated_payloads_rejected() {
        let err = BetweenArguments::from_bytes(&[0, 0]).unwrap_err();
        assert_eq!(err.code().code(), "HALO_INVALID_ARGUMENT");

        let err = BetweenArguments::from_bytes(&[0, 0, 0, 9, b'a']).unwrap_err();
        assert_eq!(err.code().code(), "HALO_INVALID_ARGUMENT");
    }
}

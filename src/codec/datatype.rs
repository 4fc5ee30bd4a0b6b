//! Column data types and their ordering-preserving value encodings
//!
//! Every encoding compares, under unsigned byte-lexicographic order, the same
//! way the logical values compare:
//! - INT32 / INT64: big-endian with the sign bit flipped
//! - FLOAT / DOUBLE: IEEE bits, negatives fully inverted, positives sign-flipped
//! - DATETIME: canonical `YYYY-MM-DD HH:MM:SS` text (19 bytes)
//! - VARCHAR(n): raw UTF-8 bytes, at most n of them

use std::fmt;

use chrono::NaiveDateTime;

use crate::errors::{HaloError, HaloResult};

/// Canonical DATETIME text format
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_LENGTH: usize = 19;

/// Logical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE float
    Float,
    /// 64-bit IEEE float
    Double,
    /// Second-precision timestamp without zone
    DateTime,
    /// String with a fixed maximum byte length
    Varchar(usize),
}

impl DataType {
    /// Maximum encoded length in bytes
    pub fn max_length(&self) -> usize {
        match self {
            DataType::Int32 | DataType::Float => 4,
            DataType::Int64 | DataType::Double => 8,
            DataType::DateTime => DATETIME_LENGTH,
            DataType::Varchar(size) => *size,
        }
    }

    /// Returns the face name used in schema definitions
    pub fn face_name(&self) -> String {
        match self {
            DataType::Int32 => "INT32".to_string(),
            DataType::Int64 => "INT64".to_string(),
            DataType::Float => "FLOAT".to_string(),
            DataType::Double => "DOUBLE".to_string(),
            DataType::DateTime => "DATETIME".to_string(),
            DataType::Varchar(size) => format!("VARCHAR({})", size),
        }
    }

    /// Parses a face name such as `INT32` or `varchar(16)`
    pub fn from_face_name(name: &str) -> HaloResult<Self> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "INT32" => return Ok(DataType::Int32),
            "INT64" => return Ok(DataType::Int64),
            "FLOAT" => return Ok(DataType::Float),
            "DOUBLE" => return Ok(DataType::Double),
            "DATETIME" => return Ok(DataType::DateTime),
            _ => {}
        }

        if let Some(size) = upper
            .strip_prefix("VARCHAR(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let size: usize = size
                .trim()
                .parse()
                .map_err(|_| HaloError::Schema(format!("Bad VARCHAR size in '{}'", name)))?;
            if size == 0 {
                return Err(HaloError::Schema(format!(
                    "VARCHAR size must be > 0 in '{}'",
                    name
                )));
            }
            return Ok(DataType::Varchar(size));
        }

        Err(HaloError::Schema(format!("Bad data type face name: {}", name)))
    }

    /// Encodes literal text into the ordering-preserving byte form
    pub fn encode(&self, literal: &[u8]) -> HaloResult<Vec<u8>> {
        let text = std::str::from_utf8(literal).map_err(|e| {
            HaloError::encoding(
                self.face_name(),
                String::from_utf8_lossy(literal),
                e.to_string(),
            )
        })?;

        match self {
            DataType::Int32 => {
                let v: i32 = text.parse().map_err(|e| self.encoding_error(text, e))?;
                Ok(((v as u32) ^ 0x8000_0000).to_be_bytes().to_vec())
            }
            DataType::Int64 => {
                let v: i64 = text.parse().map_err(|e| self.encoding_error(text, e))?;
                Ok(((v as u64) ^ 0x8000_0000_0000_0000).to_be_bytes().to_vec())
            }
            DataType::Float => {
                let v: f32 = text.parse().map_err(|e| self.encoding_error(text, e))?;
                if v.is_nan() {
                    return Err(self.encoding_error(text, "NaN has no order"));
                }
                // -0 and +0 compare equal and share one encoding
                let bits = if v == 0.0 { 0 } else { v.to_bits() };
                let ordered = if bits >> 31 == 1 {
                    !bits
                } else {
                    bits ^ (1 << 31)
                };
                Ok(ordered.to_be_bytes().to_vec())
            }
            DataType::Double => {
                let v: f64 = text.parse().map_err(|e| self.encoding_error(text, e))?;
                if v.is_nan() {
                    return Err(self.encoding_error(text, "NaN has no order"));
                }
                let bits = if v == 0.0 { 0 } else { v.to_bits() };
                let ordered = if bits >> 63 == 1 {
                    !bits
                } else {
                    bits ^ (1 << 63)
                };
                Ok(ordered.to_be_bytes().to_vec())
            }
            DataType::DateTime => {
                let dt = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                    .map_err(|e| self.encoding_error(text, e))?;
                Ok(dt.format(DATETIME_FORMAT).to_string().into_bytes())
            }
            DataType::Varchar(size) => {
                if literal.len() > *size {
                    return Err(self.encoding_error(
                        text,
                        format!("{} bytes exceeds maximum of {}", literal.len(), size),
                    ));
                }
                Ok(literal.to_vec())
            }
        }
    }

    /// Renders an encoded value back to literal text
    pub fn decode(&self, encoded: &[u8]) -> HaloResult<String> {
        match self {
            DataType::Int32 => {
                let bits = u32::from_be_bytes(self.fixed::<4>(encoded)?);
                Ok(((bits ^ 0x8000_0000) as i32).to_string())
            }
            DataType::Int64 => {
                let bits = u64::from_be_bytes(self.fixed::<8>(encoded)?);
                Ok(((bits ^ 0x8000_0000_0000_0000) as i64).to_string())
            }
            DataType::Float => {
                let ordered = u32::from_be_bytes(self.fixed::<4>(encoded)?);
                let bits = if ordered >> 31 == 1 {
                    ordered ^ (1 << 31)
                } else {
                    !ordered
                };
                Ok(f32::from_bits(bits).to_string())
            }
            DataType::Double => {
                let ordered = u64::from_be_bytes(self.fixed::<8>(encoded)?);
                let bits = if ordered >> 63 == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Ok(f64::from_bits(bits).to_string())
            }
            DataType::DateTime | DataType::Varchar(_) => String::from_utf8(encoded.to_vec())
                .map_err(|e| {
                    HaloError::encoding(
                        self.face_name(),
                        String::from_utf8_lossy(encoded),
                        e.to_string(),
                    )
                }),
        }
    }

    fn fixed<const N: usize>(&self, encoded: &[u8]) -> HaloResult<[u8; N]> {
        encoded.try_into().map_err(|_| {
            HaloError::invalid_argument(format!(
                "{} value must be {} bytes, got {}",
                self.face_name(),
                N,
                encoded.len()
            ))
        })
    }

    fn encoding_error(&self, literal: &str, reason: impl fmt::Display) -> HaloError {
        HaloError::encoding(self.face_name(), literal, reason.to_string())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(dt: DataType, literal: &str) -> Vec<u8> {
        dt.encode(literal.as_bytes()).unwrap()
    }

    #[test]
    fn test_face_names() {
        assert_eq!(DataType::from_face_name("INT32").unwrap(), DataType::Int32);
        assert_eq!(DataType::from_face_name("int64").unwrap(), DataType::Int64);
        assert_eq!(
            DataType::from_face_name("varchar(16)").unwrap(),
            DataType::Varchar(16)
        );
        assert_eq!(DataType::Varchar(16).face_name(), "VARCHAR(16)");
        assert!(DataType::from_face_name("VARCHAR(x)").is_err());
        assert!(DataType::from_face_name("VARCHAR(0)").is_err());
        assert!(DataType::from_face_name("BLOB").is_err());
    }

    #[test]
    fn test_max_lengths() {
        assert_eq!(DataType::Int32.max_length(), 4);
        assert_eq!(DataType::Int64.max_length(), 8);
        assert_eq!(DataType::Float.max_length(), 4);
        assert_eq!(DataType::Double.max_length(), 8);
        assert_eq!(DataType::DateTime.max_length(), 19);
        assert_eq!(DataType::Varchar(7).max_length(), 7);
    }

    #[test]
    fn test_round_trip_boundaries() {
        let cases: &[(DataType, &[&str])] = &[
            (DataType::Int32, &["0", "2147483647", "-2147483648", "87"]),
            (
                DataType::Int64,
                &["0", "9223372036854775807", "-9223372036854775808"],
            ),
            (DataType::Float, &["0", "1.5", "-0.5"]),
            (DataType::Double, &["0", "3.25", "-1024.125"]),
            (DataType::DateTime, &["2014-01-01 00:00:00", "1999-12-31 23:59:59"]),
            (DataType::Varchar(4), &["", "abcd", "jack"]),
        ];

        for (dt, literals) in cases {
            for literal in *literals {
                let encoded = enc(*dt, literal);
                assert_eq!(&dt.decode(&encoded).unwrap(), literal, "{} {}", dt, literal);
            }
        }
    }

    #[test]
    fn test_integer_ordering_across_sign() {
        let values = ["-2147483648", "-100", "-1", "0", "1", "99", "2147483647"];
        let encoded: Vec<Vec<u8>> = values.iter().map(|v| enc(DataType::Int32, v)).collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_float_ordering_across_sign() {
        let values = ["-1000.5", "-1", "-0.25", "0", "0.25", "1", "1000.5"];
        let encoded: Vec<Vec<u8>> = values.iter().map(|v| enc(DataType::Double, v)).collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_signed_zeros_share_encoding() {
        for dt in [DataType::Float, DataType::Double] {
            assert_eq!(enc(dt, "-0"), enc(dt, "0"));
            assert_eq!(enc(dt, "-0.0"), enc(dt, "+0.0"));
            assert!(enc(dt, "-0.0") < enc(dt, "0.25"));
            assert!(enc(dt, "-0.25") < enc(dt, "-0.0"));
            assert_eq!(dt.decode(&enc(dt, "-0")).unwrap(), "0");
        }
    }

    #[test]
    fn test_nan_rejected() {
        for dt in [DataType::Float, DataType::Double] {
            for literal in ["NaN", "nan", "-NaN"] {
                let err = dt.encode(literal.as_bytes()).unwrap_err();
                assert_eq!(err.code().code(), "HALO_ENCODING_ERROR", "{} {}", dt, literal);
            }
        }
        // Infinities are ordered and stay accepted
        assert!(enc(DataType::Double, "1e308") < enc(DataType::Double, "inf"));
        assert!(enc(DataType::Double, "-inf") < enc(DataType::Double, "-1e308"));
    }

    #[test]
    fn test_bad_literals_rejected() {
        let err = DataType::Int32.encode(b"abc").unwrap_err();
        assert_eq!(err.code().code(), "HALO_ENCODING_ERROR");

        assert!(DataType::Int32.encode(b"2147483648").is_err());
        assert!(DataType::Double.encode(b"1.2.3").is_err());
        assert!(DataType::DateTime.encode(b"2014-13-01 00:00:00").is_err());
        assert!(DataType::Varchar(3).encode(b"abcd").is_err());
    }

    #[test]
    fn test_datetime_is_canonical_text() {
        let encoded = enc(DataType::DateTime, "2014-07-14 08:30:00");
        assert_eq!(encoded, b"2014-07-14 08:30:00".to_vec());
        assert_eq!(encoded.len(), DataType::DateTime.max_length());
    }

    #[test]
    fn test_decode_wrong_width() {
        let err = DataType::Int64.decode(&[0, 1, 2]).unwrap_err();
        assert_eq!(err.code().code(), "HALO_INVALID_ARGUMENT");
    }
}

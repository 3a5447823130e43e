// src/core/job_id.rs
//! Store-assigned record identifiers.
//!
//! An identifier is 12 bytes rendered as 24 lowercase hex characters: a
//! big-endian Unix timestamp (seconds) followed by 8 random bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const JOB_ID_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a {JOB_ID_LEN}-character hexadecimal identifier: {0:?}")]
pub struct InvalidJobId(pub String);

impl JobId {
    /// Generate a fresh identifier for a new record
    pub fn generate() -> Self {
        let seconds = timestamp_prefix(chrono::Utc::now().timestamp());
        let random = uuid::Uuid::new_v4();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Syntactic check only; says nothing about whether a record exists
    pub fn is_valid(candidate: &str) -> bool {
        candidate.len() == JOB_ID_LEN && candidate.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Seconds outside the 32-bit range saturate instead of wrapping
fn timestamp_prefix(seconds: i64) -> u32 {
    u32::try_from(seconds).unwrap_or(if seconds < 0 { 0 } else { u32::MAX })
}

impl FromStr for JobId {
    type Err = InvalidJobId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidJobId(s.to_string()))
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = JobId::generate();
        let b = JobId::generate();
        assert!(JobId::is_valid(a.as_str()));
        assert_eq!(a.as_str().len(), JOB_ID_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_id_starts_with_timestamp() {
        let before = timestamp_prefix(chrono::Utc::now().timestamp());
        let id = JobId::generate();
        let prefix = u32::from_str_radix(&id.as_str()[..8], 16).unwrap();
        assert!(prefix >= before && prefix <= before + 2);
    }

    #[test]
    fn test_timestamp_prefix_saturates() {
        assert_eq!(timestamp_prefix(1_730_886_739), 1_730_886_739);
        assert_eq!(timestamp_prefix(-5), 0);
        assert_eq!(timestamp_prefix(i64::from(u32::MAX) + 1), u32::MAX);
    }

    #[test]
    fn test_parse_accepts_hex_and_normalizes_case() {
        let id: JobId = "672B3C53EA47AEBA8E4F758C".parse().unwrap();
        assert_eq!(id.as_str(), "672b3c53ea47aeba8e4f758c");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("invalid-id".parse::<JobId>().is_err());
        assert!("".parse::<JobId>().is_err());
        assert!("672b3c53ea47aeba8e4f758".parse::<JobId>().is_err());
        assert!("672b3c53ea47aeba8e4f758cc".parse::<JobId>().is_err());
        assert!("672b3c53ea47aeba8e4f758g".parse::<JobId>().is_err());
    }
}

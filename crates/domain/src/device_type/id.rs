use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Value object representing a device type primary key
///
/// Rules:
/// - Exactly 24 hexadecimal characters
/// - Stored lowercase; parsing accepts either case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceTypeId(String);

impl DeviceTypeId {
    pub const LEN: usize = 24;

    /// Create a DeviceTypeId with validation
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if !Self::is_well_formed(&id) {
            return Err(DomainError::ValidationFailed(format!(
                "Device type id {id} must be {} hexadecimal characters",
                Self::LEN
            )));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build a key from creation seconds and 8 random bytes
    pub fn from_parts(timestamp_secs: u32, random: [u8; 8]) -> Self {
        let mut hex = String::with_capacity(Self::LEN);
        for byte in timestamp_secs.to_be_bytes().iter().chain(random.iter()) {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    pub fn is_well_formed(raw: &str) -> bool {
        raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DeviceTypeId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DeviceTypeId> for String {
    fn from(id: DeviceTypeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_id() {
        let id = DeviceTypeId::new("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_uppercase_is_normalized() {
        let id = DeviceTypeId::new("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_wrong_length() {
        assert!(DeviceTypeId::new("65a1f0c2").is_err());
        assert!(DeviceTypeId::new("65a1f0c2e4b0a1b2c3d4e5f6a").is_err());
        assert!(DeviceTypeId::new("").is_err());
    }

    #[test]
    fn test_non_hex() {
        let result = DeviceTypeId::new("65a1f0c2e4b0a1b2c3d4e5fz");
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_from_parts() {
        let id = DeviceTypeId::from_parts(0x65a1f0c2, [0xe4, 0xb0, 0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6]);
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert!(DeviceTypeId::is_well_formed(id.as_str()));
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<DeviceTypeId>("\"nope\"").is_err());
        let id: DeviceTypeId = serde_json::from_str("\"65a1f0c2e4b0a1b2c3d4e5f6\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65a1f0c2e4b0a1b2c3d4e5f6\"");
    }
}

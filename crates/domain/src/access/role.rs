use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Caller authorization level, supplied already verified by the auth layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[serde(alias = "owner")]
    Owner,
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "user")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OWNER" => Ok(Self::Owner),
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Owner.as_str(), "OWNER");
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert_eq!(Role::User.as_str(), "USER");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = "root".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("root".to_string()));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}

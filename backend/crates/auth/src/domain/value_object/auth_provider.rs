use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an account authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    #[display("local")]
    Local,
    #[display("google")]
    Google,
}

impl AuthProvider {
    pub const fn code(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            other => Err(format!("Invalid auth provider: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AuthProvider::default(), AuthProvider::Local);
        assert_eq!("google".parse::<AuthProvider>(), Ok(AuthProvider::Google));
        assert_eq!(AuthProvider::Google.to_string(), "google");
        assert!("github".parse::<AuthProvider>().is_err());
    }
}

//! Identity and credential types for the login flow.
//!
//! `Identity` is the authenticated principal's display data. It is only ever
//! produced by an auth gateway and is immutable afterwards: consumers receive
//! clones, never `&mut` access. When it crosses the navigation boundary it is
//! passed by value; the JSON form round-trips all four fields exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Login name, unique per session.
    pub username: String,
    /// Full display name.
    pub full_name: String,
    /// Role/profile label (e.g. "Alumno").
    pub profile_name: String,
    /// Contact email. May be empty.
    pub email: String,
}

impl Identity {
    /// Returns the first word of the full name, for casual greetings.
    ///
    /// Falls back to the full name when it has no spaces.
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }

    /// Returns up to two uppercase initials for the avatar badge.
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// The username/password pair entered by the user, pre-authentication.
///
/// Transient: mutated freely by input events, never persisted, never
/// serialized, discarded when the session terminates. The Debug impl redacts
/// the password so credentials cannot leak into logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            username: "mavina".to_string(),
            full_name: "Marco Antonio Aviña Jimenez".to_string(),
            profile_name: "Alumno".to_string(),
            email: "marco@sigo.example".to_string(),
        }
    }

    #[test]
    fn test_first_name_takes_leading_word() {
        assert_eq!(identity().first_name(), "Marco");
    }

    #[test]
    fn test_first_name_falls_back_to_full_name() {
        let id = Identity {
            full_name: "Cher".to_string(),
            ..identity()
        };
        assert_eq!(id.first_name(), "Cher");
    }

    #[test]
    fn test_initials_take_first_two_words() {
        assert_eq!(identity().initials(), "MA");
    }

    #[test]
    fn test_json_round_trip_preserves_all_fields() {
        let id = identity();
        let json = serde_json::to_string(&id).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let json = serde_json::to_value(identity()).unwrap();
        assert!(json.get("fullName").is_some());
        assert!(json.get("profileName").is_some());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            username: "mavina".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("mavina"));
        assert!(!debug.contains("hunter2"));
    }
}

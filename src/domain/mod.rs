//! Domain types for users and connection requests.
//!
//! Roles and statuses are closed enums; ids are newtypes so an application id
//! can never be confused with any other integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for an [`Application`].
///
/// # Examples
///
/// ```rust
/// use lpg_connect::domain::ApplicationId;
///
/// let id = ApplicationId::new(1001);
/// assert_eq!(id.value(), 1001);
/// assert_eq!(id.to_string(), "1001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ApplicationId(i32);

impl ApplicationId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ApplicationId> for i32 {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

impl From<i32> for ApplicationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl FromStr for ApplicationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Serialize for ApplicationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for ApplicationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self)
    }
}

/// Returned when a stored or typed value names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(UnknownVariant {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a connection request.
///
/// Administrators may move an application between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Pending and approved applications block a new submission by the same applicant.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownVariant {
                kind: "application status",
                value: s.to_string(),
            }),
        }
    }
}

/// A registered account. The password is kept as entered.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// A connection request as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_username: String,
    pub name: String,
    pub mobile_no: String,
    pub address: String,
    pub num_connections: i32,
    pub status: ApplicationStatus,
    /// Set by the durable store only.
    pub created_at: Option<String>,
}

/// A validated connection request that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub applicant_username: String,
    pub name: String,
    pub mobile_no: String,
    pub address: String,
    pub num_connections: i32,
    pub status: ApplicationStatus,
}

impl NewApplication {
    /// Builds the record with the given id, as the volatile store does on insert.
    #[must_use]
    pub fn into_application(self, id: ApplicationId) -> Application {
        Application {
            id,
            applicant_username: self.applicant_username,
            name: self.name,
            mobile_no: self.mobile_no,
            address: self.address,
            num_connections: self.num_connections,
            status: self.status,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_conversions() {
        let id = ApplicationId::new(1001);
        assert_eq!(id.value(), 1001);
        assert_eq!(id.to_string(), "1001");
        assert_eq!(i32::from(id), 1001);
        assert_eq!(ApplicationId::from(1001), id);
        assert_eq!(" 1001 ".parse::<ApplicationId>().unwrap(), id);
        assert!("abc".parse::<ApplicationId>().is_err());
    }

    #[test]
    fn application_id_serialization() {
        let id = ApplicationId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: ApplicationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert_eq!(
            "approved".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Approved
        );
        assert!("CANCELLED".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn only_pending_and_approved_are_active() {
        assert!(ApplicationStatus::Pending.is_active());
        assert!(ApplicationStatus::Approved.is_active());
        assert!(!ApplicationStatus::Rejected.is_active());
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn role_parsing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        let err = "root".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: root");
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn user_debug_hides_password() {
        let user = User::new("alice", "pw1", Role::User);
        let rendered = format!("{user:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("pw1"));
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&ApplicationStatus::Rejected).unwrap();
        assert_eq!(json, "\"REJECTED\"");
    }
}

//! Role and account status model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A subject's position in the organization.
///
/// Supplied by the caller with each request, never inferred. Serialized with
/// its wire name (`SUPER_ADMIN`, `CLUB_OWNER`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    FederationAdmin,
    FederationSecretariat,
    CommitteeChair,
    CommitteeMember,
    ClubOwner,
    ClubManager,
    HeadCoach,
    AssistantCoach,
    ClubStaff,
    MediaManager,
    Member,
    Parent,
    Vendor,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Self; 14] = [
        Self::SuperAdmin,
        Self::FederationAdmin,
        Self::FederationSecretariat,
        Self::CommitteeChair,
        Self::CommitteeMember,
        Self::ClubOwner,
        Self::ClubManager,
        Self::HeadCoach,
        Self::AssistantCoach,
        Self::ClubStaff,
        Self::MediaManager,
        Self::Member,
        Self::Parent,
        Self::Vendor,
    ];

    /// Wire name of this role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::FederationAdmin => "FEDERATION_ADMIN",
            Self::FederationSecretariat => "FEDERATION_SECRETARIAT",
            Self::CommitteeChair => "COMMITTEE_CHAIR",
            Self::CommitteeMember => "COMMITTEE_MEMBER",
            Self::ClubOwner => "CLUB_OWNER",
            Self::ClubManager => "CLUB_MANAGER",
            Self::HeadCoach => "HEAD_COACH",
            Self::AssistantCoach => "ASSISTANT_COACH",
            Self::ClubStaff => "CLUB_STAFF",
            Self::MediaManager => "MEDIA_MANAGER",
            Self::Member => "MEMBER",
            Self::Parent => "PARENT",
            Self::Vendor => "VENDOR",
        }
    }

    /// Parse a role lifted out of a session.
    ///
    /// Only the exact wire name is accepted. Unknown names yield `None`, which every access check treats as an
    /// unauthenticated subject.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// Account status attached to an authenticated session.
///
/// Only `pending` changes access decisions; every other value is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    Active,
    Pending,
    Other(String),
}

impl AccountStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<&str> for AccountStatus {
    // Exact, case-sensitive match: `Pending` is not `pending`.
    fn from(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AccountStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            _ => Self::Other(value),
        }
    }
}

impl From<AccountStatus> for String {
    fn from(value: AccountStatus) -> Self {
        match value {
            AccountStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The permission-relevant slice of an authenticated session.
///
/// `role == None` means unauthenticated (or an unrecognized role name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<AccountStatus>,
}

impl Subject {
    #[must_use]
    pub const fn new(role: Option<Role>, status: Option<AccountStatus>) -> Self {
        Self { role, status }
    }

    /// Build a subject from raw session strings.
    ///
    /// Unknown role names degrade to `None` instead of failing.
    #[must_use]
    pub fn from_raw(role: Option<&str>, status: Option<&str>) -> Self {
        Self {
            role: role.and_then(Role::parse),
            status: status.map(AccountStatus::from),
        }
    }
}

//! Navigation guard decisions built on the access checks.

use serde::Serialize;
use tracing::debug;

use crate::access::authorizer::get_default_route;
use crate::config::RouteConfig;
use crate::models::{AccountStatus, Subject};

/// What a page guard should do with a navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "location", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    /// Send the subject to this path instead
    Redirect(&'static str),
}

impl AccessDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Reaction to a live change of the session's role or status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermissionChange {
    /// Role changed; `redirect` is set when the current page became off
    /// limits or the same update approved the account
    RoleChanged {
        from: Option<String>,
        to: Option<String>,
        /// The same update also moved the account from `pending` to `active`
        approved: bool,
        redirect: Option<&'static str>,
    },
    /// Account moved from `pending` to `active`
    Approved { redirect: &'static str },
    StatusChanged {
        from: Option<String>,
        to: Option<String>,
    },
}

impl PermissionChange {
    /// Path the client should navigate to, if any
    #[must_use]
    pub const fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::RoleChanged { redirect, .. } => *redirect,
            Self::Approved { redirect } => Some(*redirect),
            Self::StatusChanged { .. } => None,
        }
    }
}

impl RouteConfig {
    /// Allow the request or redirect to the subject's landing page.
    ///
    /// Unauthenticated subjects are sent to `/login`, pending ones to
    /// `/pending-approval`.
    pub fn guard(&self, path: &str, subject: &Subject) -> AccessDecision {
        if self.can_access_route(path, subject.role, subject.status.as_ref()) {
            return AccessDecision::Allow;
        }
        let target = get_default_route(subject.role, subject.status.as_ref());
        debug!(path, target, "redirecting");
        AccessDecision::Redirect(target)
    }

    /// Work out how a client sitting on `path` reacts when its session
    /// changes from `previous` to `current`.
    ///
    /// Role and status changes are evaluated independently. When one update
    /// carries both a role change and an approval, the approval's landing
    /// page wins over the access-loss redirect.
    pub fn on_permission_change(
        &self,
        previous: &Subject,
        current: &Subject,
        path: Option<&str>,
    ) -> Option<PermissionChange> {
        let approved = previous.status.as_ref().is_some_and(AccountStatus::is_pending)
            && current.status == Some(AccountStatus::Active);
        let approval_redirect =
            approved.then(|| get_default_route(current.role, Some(&AccountStatus::Active)));

        if previous.role != current.role {
            let access_redirect = path
                .filter(|path| {
                    !self.can_access_route(path, current.role, current.status.as_ref())
                })
                .map(|_| get_default_route(current.role, current.status.as_ref()));
            return Some(PermissionChange::RoleChanged {
                from: previous.role.map(|role| role.to_string()),
                to: current.role.map(|role| role.to_string()),
                approved,
                redirect: approval_redirect.or(access_redirect),
            });
        }

        if previous.status == current.status {
            return None;
        }

        if let Some(redirect) = approval_redirect {
            return Some(PermissionChange::Approved { redirect });
        }

        Some(PermissionChange::StatusChanged {
            from: previous.status.as_ref().map(ToString::to_string),
            to: current.status.as_ref().map(ToString::to_string),
        })
    }
}

//! Route access decisions over a [`RouteConfig`].

use tracing::debug;

use crate::access::pattern::matches_any;
use crate::config::RouteConfig;
use crate::models::{AccountStatus, Role};

/// Landing page for pending accounts, regardless of role
pub const PENDING_APPROVAL_ROUTE: &str = "/pending-approval";
/// Landing page for unauthenticated subjects and unknown roles
pub const LOGIN_ROUTE: &str = "/login";

impl RouteConfig {
    /// True when `path` matches any public pattern.
    ///
    /// Paths are compared verbatim: no trailing-slash, query or case
    /// normalization.
    pub fn is_public_route(&self, path: &str) -> bool {
        matches_any(&self.public_routes, path)
    }

    /// Decide whether a subject may open `path`.
    ///
    /// Rules apply in fixed priority: public routes, then missing role
    /// (deny), then pending status (pending table only), then the role table.
    pub fn can_access_route(
        &self,
        path: &str,
        role: Option<Role>,
        status: Option<&AccountStatus>,
    ) -> bool {
        if self.is_public_route(path) {
            debug!(path, "public route");
            return true;
        }

        let Some(role) = role else {
            debug!(path, "denied: unauthenticated");
            return false;
        };

        if status.is_some_and(AccountStatus::is_pending) {
            let allowed = matches_any(&self.pending_user_routes, path);
            debug!(path, %role, allowed, "pending account");
            return allowed;
        }

        let Some(routes) = self.routes_for(role) else {
            debug!(path, %role, "denied: role has no route table");
            return false;
        };

        let allowed = matches_any(routes, path);
        debug!(path, %role, allowed, "role route check");
        allowed
    }
}

/// Landing path for a subject.
///
/// Pending status wins over every role; no role means `/login`.
pub const fn get_default_route(role: Option<Role>, status: Option<&AccountStatus>) -> &'static str {
    if let Some(AccountStatus::Pending) = status {
        return PENDING_APPROVAL_ROUTE;
    }

    match role {
        Some(Role::SuperAdmin) => "/super-admin",
        Some(Role::FederationAdmin | Role::FederationSecretariat) => "/admin",
        Some(Role::CommitteeChair | Role::CommitteeMember) => "/committees",
        Some(
            Role::ClubOwner
            | Role::ClubManager
            | Role::HeadCoach
            | Role::AssistantCoach
            | Role::ClubStaff
            | Role::MediaManager,
        ) => "/club-dashboard",
        Some(Role::Member | Role::Parent | Role::Vendor) => "/my-profile",
        None => LOGIN_ROUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::RoutePattern;

    const ACTIVE: Option<&AccountStatus> = Some(&AccountStatus::Active);
    const PENDING: Option<&AccountStatus> = Some(&AccountStatus::Pending);

    fn builtin() -> &'static RouteConfig {
        RouteConfig::builtin()
    }

    fn all_statuses() -> Vec<Option<AccountStatus>> {
        vec![
            None,
            Some(AccountStatus::Active),
            Some(AccountStatus::Pending),
            Some(AccountStatus::Other("suspended".to_string())),
        ]
    }

    #[test]
    fn public_routes_match_exact_and_wildcards() {
        let config = builtin();
        assert!(config.is_public_route("/login"));
        assert!(config.is_public_route("/register"));
        assert!(config.is_public_route("/register/club"));
        assert!(config.is_public_route("/invite/abc123"));
        assert!(config.is_public_route("/setup/initial-admin"));
        assert!(!config.is_public_route("/setup"));
        assert!(!config.is_public_route("/admin"));
        assert!(!config.is_public_route("/login/"));
    }

    #[test]
    fn public_prefix_quirk_is_preserved() {
        assert!(builtin().is_public_route("/registerx"));
        assert!(builtin().is_public_route("/registerxyz/abc"));
    }

    #[test]
    fn public_routes_allow_every_subject() {
        for path in ["/login", "/register/step-2", "/invite/token"] {
            assert!(builtin().can_access_route(path, None, None));
            for role in Role::ALL {
                for status in all_statuses() {
                    assert!(builtin().can_access_route(path, Some(role), status.as_ref()));
                }
            }
        }
    }

    #[test]
    fn unauthenticated_is_denied_private_routes() {
        assert!(!builtin().can_access_route("/my-profile", None, ACTIVE));
        assert!(!builtin().can_access_route("/pending-approval", None, PENDING));
    }

    #[test]
    fn exact_role_patterns_are_reachable_when_active() {
        let config = builtin();
        for role in Role::ALL {
            for pattern in config.routes_for(role).unwrap() {
                if let RoutePattern::Exact(path) = pattern {
                    assert!(config.can_access_route(path, Some(role), ACTIVE), "{role} {path}");
                }
            }
        }
    }

    #[test]
    fn pending_table_supersedes_role_table() {
        let config = builtin();
        for role in Role::ALL {
            assert!(config.can_access_route("/pending-approval", Some(role), PENDING));
            assert!(config.can_access_route("/profile-setup", Some(role), PENDING));
            assert!(!config.can_access_route("/my-profile", Some(role), PENDING));
        }
        assert!(!config.can_access_route("/super-admin", Some(Role::SuperAdmin), PENDING));
    }

    #[test]
    fn member_routes_follow_table() {
        let config = builtin();
        let member = Some(Role::Member);
        assert!(config.can_access_route("/my-profile/settings", member, ACTIVE));
        assert!(config.can_access_route("/events", member, ACTIVE));
        assert!(!config.can_access_route("/admin", member, ACTIVE));
        assert!(!config.can_access_route("/club-dashboard", member, ACTIVE));
    }

    #[test]
    fn wildcard_matches_deep_paths_and_bare_prefix() {
        let config = RouteConfig::parse(r#"{"role_routes": {"MEMBER": ["/foo/*"]}}"#).unwrap();
        assert!(config.can_access_route("/foo/bar/baz", Some(Role::Member), ACTIVE));
        // plain prefix test, so the bare base path is admitted too
        assert!(config.can_access_route("/foo", Some(Role::Member), ACTIVE));
        assert!(!config.can_access_route("/fo", Some(Role::Member), ACTIVE));
    }

    #[test]
    fn staff_roles_only_see_listed_dashboard_pages() {
        let config = builtin();
        let staff = Some(Role::ClubStaff);
        assert!(config.can_access_route("/club-dashboard/attendance", staff, ACTIVE));
        assert!(!config.can_access_route("/club-dashboard", staff, ACTIVE));
        assert!(!config.can_access_route("/club-dashboard/finance", staff, ACTIVE));
    }

    #[test]
    fn role_without_table_entry_is_denied() {
        let config = RouteConfig::parse(r#"{"role_routes": {"MEMBER": ["/my-profile"]}}"#).unwrap();
        assert!(!config.can_access_route("/my-profile", Some(Role::Vendor), ACTIVE));
        assert!(config.can_access_route("/my-profile", Some(Role::Member), ACTIVE));
    }

    #[test]
    fn non_pending_statuses_use_role_table() {
        let suspended = AccountStatus::Other("suspended".to_string());
        assert!(builtin().can_access_route("/admin", Some(Role::SuperAdmin), Some(&suspended)));
        assert!(builtin().can_access_route("/admin", Some(Role::SuperAdmin), None));
    }

    #[test]
    fn default_route_per_role() {
        assert_eq!(get_default_route(Some(Role::SuperAdmin), ACTIVE), "/super-admin");
        assert_eq!(get_default_route(Some(Role::FederationSecretariat), ACTIVE), "/admin");
        assert_eq!(get_default_route(Some(Role::CommitteeMember), ACTIVE), "/committees");
        assert_eq!(get_default_route(Some(Role::MediaManager), ACTIVE), "/club-dashboard");
        assert_eq!(get_default_route(Some(Role::Member), ACTIVE), "/my-profile");
        assert_eq!(get_default_route(Some(Role::Vendor), None), "/my-profile");
        assert_eq!(get_default_route(None, ACTIVE), "/login");
        assert_eq!(get_default_route(None, None), "/login");
    }

    #[test]
    fn default_route_is_pending_approval_for_every_pending_role() {
        for role in Role::ALL {
            assert_eq!(get_default_route(Some(role), PENDING), PENDING_APPROVAL_ROUTE);
        }
        assert_eq!(get_default_route(None, PENDING), PENDING_APPROVAL_ROUTE);
    }

    #[test]
    fn default_routes_are_accessible_to_active_subjects() {
        let full_access = Role::ALL.into_iter().filter(|role| {
            !matches!(
                role,
                Role::ClubStaff | Role::AssistantCoach | Role::MediaManager
            )
        });
        for role in full_access {
            let landing = get_default_route(Some(role), ACTIVE);
            assert!(builtin().can_access_route(landing, Some(role), ACTIVE), "{role}");
        }
    }

    #[test]
    fn limited_dashboard_roles_land_outside_their_table() {
        for role in [Role::ClubStaff, Role::AssistantCoach, Role::MediaManager] {
            let landing = get_default_route(Some(role), ACTIVE);
            assert_eq!(landing, "/club-dashboard");
            assert!(!builtin().can_access_route(landing, Some(role), ACTIVE));
        }
    }
}

//! Built-in route tables.

use crate::models::Role;

pub const PUBLIC_ROUTES: &[&str] = &[
    "/login",
    "/register",
    "/register/*",
    "/invite/*",
    "/setup/initial-admin",
];

pub const PENDING_USER_ROUTES: &[&str] = &["/pending-approval", "/profile-setup", "/login"];

/// Patterns granted to each role. Exhaustive over [`Role`].
pub const fn role_routes(role: Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin => &[
            "/super-admin",
            "/super-admin/*",
            "/system/*",
            "/admin",
            "/admin/*",
            "/club-dashboard",
            "/club-dashboard/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::FederationAdmin | Role::FederationSecretariat => &[
            "/admin",
            "/admin/*",
            "/committees",
            "/committees/*",
            "/competitions",
            "/competitions/*",
            "/members",
            "/members/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::CommitteeChair | Role::CommitteeMember => &[
            "/committees",
            "/committees/*",
            "/competitions",
            "/competitions/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::ClubOwner | Role::ClubManager => &[
            "/club-dashboard",
            "/club-dashboard/*",
            "/members",
            "/members/*",
            "/events",
            "/events/*",
            "/competitions",
            "/competitions/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::ClubStaff => &[
            "/club-dashboard/class-status",
            "/club-dashboard/classes",
            "/club-dashboard/attendance",
            "/members",
            "/members/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::HeadCoach => &[
            "/club-dashboard",
            "/club-dashboard/*",
            "/members",
            "/members/*",
            "/events",
            "/events/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::AssistantCoach => &[
            "/club-dashboard/class-status",
            "/club-dashboard/classes",
            "/club-dashboard/level-tests",
            "/members",
            "/members/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::MediaManager => &[
            "/club-dashboard/media",
            "/club-dashboard/announcements",
            "/events",
            "/events/*",
            "/my-profile",
            "/my-profile/*",
        ],
        Role::Member => &[
            "/my-profile",
            "/my-profile/*",
            "/events",
            "/events/*",
            "/competitions",
            "/competitions/*",
            "/announcements",
            "/announcements/*",
            "/level-tests",
            "/level-tests/*",
        ],
        Role::Parent => &[
            "/my-profile",
            "/my-profile/*",
            "/events",
            "/events/*",
            "/competitions",
            "/competitions/*",
            "/announcements",
            "/announcements/*",
        ],
        Role::Vendor => &["/my-profile", "/my-profile/*"],
    }
}

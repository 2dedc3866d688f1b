//! Authorization decisions. Pure functions, no side effects; callers apply
//! the verdict.

use crate::constants::ADMIN_USERNAME;
use crate::models::user::Role;

/// A receipt may be deleted by an admin or by its creator.
#[must_use]
pub fn can_delete_entry(actor: &str, role: Role, added_by: &str) -> bool {
    role.is_admin() || actor == added_by
}

/// Range deletion is admin-only.
#[must_use]
pub const fn can_bulk_delete(role: Role) -> bool {
    role.is_admin()
}

/// User administration is admin-only.
#[must_use]
pub const fn can_manage_users(role: Role) -> bool {
    role.is_admin()
}

/// The seeded admin account and the acting user's own account are never
/// deletable. The caller must already have passed [`can_manage_users`].
#[must_use]
pub fn can_delete_user(target_username: &str, actor_username: &str) -> bool {
    target_username != ADMIN_USERNAME && target_username != actor_username
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deletion_owner_or_admin() {
        assert!(can_delete_entry("alice", Role::User, "alice"));
        assert!(!can_delete_entry("bob", Role::User, "alice"));
        assert!(can_delete_entry("bob", Role::Admin, "alice"));
    }

    #[test]
    fn test_bulk_delete_is_admin_only() {
        assert!(can_bulk_delete(Role::Admin));
        assert!(!can_bulk_delete(Role::User));
    }

    #[test]
    fn test_user_management_is_admin_only() {
        assert!(can_manage_users(Role::Admin));
        assert!(!can_manage_users(Role::User));
    }

    #[test]
    fn test_admin_and_self_are_protected() {
        assert!(!can_delete_user("admin", "someone"));
        assert!(!can_delete_user("alice", "alice"));
        assert!(can_delete_user("alice", "admin"));
    }
}

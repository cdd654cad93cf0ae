//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

/// Super admins see every record; everyone else only sees their own.
pub fn sees_all_records(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        assert!(validate_role("super_admin").is_ok());
        assert!(validate_role("admin").is_ok());
    }

    #[test]
    fn unknown_role_rejected() {
        let err = validate_role("viewer").unwrap_err();
        assert!(err.contains("Invalid role"));
    }

    #[test]
    fn only_super_admin_sees_all() {
        assert!(sees_all_records(ROLE_SUPER_ADMIN));
        assert!(!sees_all_records(ROLE_ADMIN));
    }
}

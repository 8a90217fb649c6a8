use serde::{Deserialize, Serialize};
use taskdeck_core::Role;

/// The current session's user, as resolved by the identity collaborator.
///
/// Read-only input: the repository and query layers consume it (role checks,
/// `created_by` attribution) and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_roles() {
        let admin = SessionUser::new("1", "Admin User", "admin@example.com", Role::Admin);
        let client = SessionUser::new("2", "Client User", "client@example.com", Role::Client);

        assert!(admin.is_admin());
        assert!(!client.is_admin());
    }
}

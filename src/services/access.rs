//! Role gate for an authenticated caller.

use thiserror::Error;

use crate::domain::{Application, Role, User};

/// Something a caller may try to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    CreateOwnApplication,
    ReadOwnApplications,
    ReadAllApplications,
    ChangeStatus,
    DeleteApplication,
    ManageUsers,
}

impl Permission {
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::CreateOwnApplication => "submit applications",
            Self::ReadOwnApplications => "view their applications",
            Self::ReadAllApplications => "view all applications",
            Self::ChangeStatus => "change application status",
            Self::DeleteApplication => "delete applications",
            Self::ManageUsers => "manage users",
        }
    }
}

/// Whether `role` grants `permission`.
#[must_use]
pub const fn allows(role: Role, permission: Permission) -> bool {
    match role {
        Role::Admin => true,
        Role::User => matches!(
            permission,
            Permission::CreateOwnApplication | Permission::ReadOwnApplications
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{role} accounts may not {action}")]
pub struct AccessDenied {
    pub role: Role,
    pub action: &'static str,
}

/// An authenticated caller.
///
/// Only [`AuthService::login`](crate::services::AuthService::login) hands
/// these out; code outside the crate cannot build one from a bare [`User`].
///
/// ```compile_fail
/// use lpg_connect::domain::{Role, User};
/// use lpg_connect::services::Session;
///
/// let forged = Session::from(User::new("mallory", "x", Role::Admin));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: Role,
}

impl Session {
    pub(crate) fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    pub const fn require(&self, permission: Permission) -> Result<(), AccessDenied> {
        if allows(self.role, permission) {
            Ok(())
        } else {
            Err(AccessDenied {
                role: self.role,
                action: permission.describe(),
            })
        }
    }

    /// Session for a user whose credentials were just checked against the store.
    pub(crate) fn from_user(user: User) -> Self {
        Self::new(user.username, user.role)
    }

    /// Admins see everything; everyone else only their own requests.
    #[must_use]
    pub fn can_view(&self, application: &Application) -> bool {
        self.role.is_admin() || application.applicant_username == self.username
    }
}

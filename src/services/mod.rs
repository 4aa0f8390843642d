pub mod access;
pub use access::{AccessDenied, Permission, Session};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::StoreAuthService;

pub mod application_service;
pub mod application_service_impl;
pub use application_service::{
    ApplicationError, ApplicationForm, ApplicationService, ApplicationStats,
};
pub use application_service_impl::StoreApplicationService;

//! Account command handlers

use tracing::error;

use super::session::{open_session, open_session_for};
use crate::cli::Credentials;
use crate::domain::Role;
use crate::services::{AuthError, Permission};
use crate::state::SharedState;

fn report(err: &AuthError) {
    if let AuthError::Storage(e) = err {
        error!(error = %e, "Account operation failed");
    }
    println!("✗ {err}");
}

pub async fn cmd_register(
    state: &SharedState,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    match state.auth.register(username, password).await {
        Ok(user) => {
            println!("✓ Registered '{}'. You can now log in.", user.username);
        }
        Err(e) => report(&e),
    }
    Ok(())
}

pub async fn cmd_login(state: &SharedState, credentials: &Credentials) -> anyhow::Result<()> {
    if let Some(session) = open_session(state, credentials).await {
        println!("✓ Logged in as {} ({})", session.username(), session.role());
    }
    Ok(())
}

pub async fn cmd_users(state: &SharedState, credentials: &Credentials) -> anyhow::Result<()> {
    let Some(session) = open_session_for(state, credentials, Permission::ManageUsers).await else {
        return Ok(());
    };

    let users = match state.auth.list_users(&session).await {
        Ok(users) => users,
        Err(e) => {
            report(&e);
            return Ok(());
        }
    };

    println!("Accounts ({} total)", users.len());
    println!("{:-<70}", "");
    for user in users {
        println!("• {} [{}]", user.username, user.role);
    }

    Ok(())
}

pub async fn cmd_add_user(
    state: &SharedState,
    credentials: &Credentials,
    username: &str,
    password: &str,
    role_str: &str,
) -> anyhow::Result<()> {
    let Ok(role) = role_str.parse::<Role>() else {
        println!("Invalid role: {role_str}");
        println!("Valid roles: ADMIN, USER");
        return Ok(());
    };

    let Some(session) = open_session_for(state, credentials, Permission::ManageUsers).await else {
        return Ok(());
    };

    match state.auth.add_user(&session, username, password, role).await {
        Ok(user) => println!("✓ Created {} account '{}'", user.role, user.username),
        Err(e) => report(&e),
    }

    Ok(())
}

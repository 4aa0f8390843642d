use chrono::NaiveDateTime;

use crate::cli::Credentials;
use crate::domain::{Application, ApplicationId};
use crate::services::{Permission, Session};
use crate::state::SharedState;

/// Logs the caller in, printing the reason when that fails.
pub async fn open_session(state: &SharedState, credentials: &Credentials) -> Option<Session> {
    let (Some(username), Some(password)) = (&credentials.username, &credentials.password) else {
        println!("This command needs an account.");
        println!("Pass your credentials with: lpg-connect -u <username> -p <password> ...");
        return None;
    };

    match state.auth.login(username, password).await {
        Ok(session) => Some(session),
        Err(e) => {
            println!("✗ {e}");
            None
        }
    }
}

/// Like [`open_session`], but also requires `permission`.
pub async fn open_session_for(
    state: &SharedState,
    credentials: &Credentials,
    permission: Permission,
) -> Option<Session> {
    let session = open_session(state, credentials).await?;
    if let Err(e) = session.require(permission) {
        println!("✗ {e}");
        return None;
    }
    Some(session)
}

pub fn parse_id(id_str: &str) -> Option<ApplicationId> {
    if let Ok(id) = id_str.parse() {
        Some(id)
    } else {
        println!("Invalid application ID: {id_str}");
        println!("Use 'lpg-connect mine' or 'lpg-connect list' to see IDs.");
        None
    }
}

fn submitted_at(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map_or_else(
        |_| raw.to_string(),
        |ts| ts.format("%d %b %Y %H:%M").to_string(),
    )
}

pub fn print_summary(app: &Application) {
    println!(
        "#{} [{}] {} ({})",
        app.id, app.status, app.name, app.applicant_username
    );
    println!(
        "  Mobile: {} | Connections: {}",
        app.mobile_no, app.num_connections
    );
}

pub fn print_details(app: &Application) {
    println!("Application #{}", app.id);
    println!("{:-<70}", "");
    println!("Applicant:    {}", app.applicant_username);
    println!("Name:         {}", app.name);
    println!("Mobile:       {}", app.mobile_no);
    println!("Address:      {}", app.address);
    println!("Connections:  {}", app.num_connections);
    println!("Status:       {}", app.status);
    if let Some(created_at) = &app.created_at {
        println!("Submitted:    {}", submitted_at(created_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_timestamps_are_reformatted() {
        assert_eq!(submitted_at("2025-03-04 09:15:00"), "04 Mar 2025 09:15");
    }

    #[test]
    fn unparseable_timestamps_are_shown_as_is() {
        assert_eq!(submitted_at("yesterday"), "yesterday");
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id(" 1001 "), Some(ApplicationId::new(1001)));
        assert_eq!(parse_id("abc"), None);
    }
}

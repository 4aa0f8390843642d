//! Application command handlers

use tracing::error;

use super::session::{open_session, open_session_for, parse_id, print_details, print_summary};
use crate::cli::Credentials;
use crate::domain::{Application, ApplicationStatus};
use crate::services::{ApplicationError, ApplicationForm, Permission};
use crate::state::SharedState;

fn report(err: &ApplicationError) {
    if let ApplicationError::Storage(e) = err {
        error!(error = %e, "Application operation failed");
    }
    println!("✗ {err}");
}

fn print_list(applications: &[Application]) {
    for app in applications {
        print_summary(app);
    }
}

pub async fn cmd_apply(
    state: &SharedState,
    credentials: &Credentials,
    form: ApplicationForm,
) -> anyhow::Result<()> {
    let Some(session) =
        open_session_for(state, credentials, Permission::CreateOwnApplication).await
    else {
        return Ok(());
    };

    match state.applications.create(session.username(), &form).await {
        Ok(id) => {
            println!("✓ Application submitted. Your application ID is {id}.");
            println!("Check its progress with: lpg-connect show {id}");
        }
        Err(e) => report(&e),
    }

    Ok(())
}

pub async fn cmd_my_applications(
    state: &SharedState,
    credentials: &Credentials,
) -> anyhow::Result<()> {
    let Some(session) =
        open_session_for(state, credentials, Permission::ReadOwnApplications).await
    else {
        return Ok(());
    };

    let applications = match state.applications.list_by_user(session.username()).await {
        Ok(applications) => applications,
        Err(e) => {
            report(&e);
            return Ok(());
        }
    };

    if applications.is_empty() {
        println!("You have not submitted any applications.");
        println!();
        println!("Apply with: lpg-connect apply --name ... --mobile ... --address ... --connections ...");
        return Ok(());
    }

    println!("Your Applications ({} total)", applications.len());
    println!("{:-<70}", "");
    print_list(&applications);

    Ok(())
}

pub async fn cmd_show_application(
    state: &SharedState,
    credentials: &Credentials,
    id_str: &str,
) -> anyhow::Result<()> {
    let Some(id) = parse_id(id_str) else {
        return Ok(());
    };
    let Some(session) = open_session(state, credentials).await else {
        return Ok(());
    };

    match state.applications.get(id).await {
        // Someone else's request looks the same as a missing one.
        Ok(app) if session.can_view(&app) => print_details(&app),
        Ok(_) | Err(ApplicationError::NotFound(_)) => {
            println!("Application with ID {id} not found.");
        }
        Err(e) => report(&e),
    }

    Ok(())
}

pub async fn cmd_list_applications(
    state: &SharedState,
    credentials: &Credentials,
    status_filter: Option<&str>,
) -> anyhow::Result<()> {
    let status = match status_filter.map(str::parse::<ApplicationStatus>).transpose() {
        Ok(status) => status,
        Err(e) => {
            println!("✗ {e}");
            println!("Valid statuses: PENDING, APPROVED, REJECTED");
            return Ok(());
        }
    };

    if open_session_for(state, credentials, Permission::ReadAllApplications)
        .await
        .is_none()
    {
        return Ok(());
    }

    let result = match status {
        Some(status) => state.applications.list_by_status(status).await,
        None => state.applications.list_all().await,
    };
    let applications = match result {
        Ok(applications) => applications,
        Err(e) => {
            report(&e);
            return Ok(());
        }
    };

    if applications.is_empty() {
        println!("No applications found.");
        return Ok(());
    }

    match status {
        Some(status) => println!("{status} Applications ({} total)", applications.len()),
        None => println!("All Applications ({} total)", applications.len()),
    }
    println!("{:-<70}", "");
    print_list(&applications);

    Ok(())
}

pub async fn cmd_set_status(
    state: &SharedState,
    credentials: &Credentials,
    id_str: &str,
    status_str: &str,
) -> anyhow::Result<()> {
    let Some(id) = parse_id(id_str) else {
        return Ok(());
    };
    let status = match status_str.parse::<ApplicationStatus>() {
        Ok(status) => status,
        Err(e) => {
            println!("✗ {e}");
            println!("Valid statuses: PENDING, APPROVED, REJECTED");
            return Ok(());
        }
    };

    if open_session_for(state, credentials, Permission::ChangeStatus)
        .await
        .is_none()
    {
        return Ok(());
    }

    match state.applications.set_status(id, status).await {
        Ok(app) => println!("✓ Application #{} is now {}", app.id, app.status),
        Err(e) => report(&e),
    }

    Ok(())
}

pub async fn cmd_delete_application(
    state: &SharedState,
    credentials: &Credentials,
    id_str: &str,
) -> anyhow::Result<()> {
    let Some(id) = parse_id(id_str) else {
        return Ok(());
    };

    if open_session_for(state, credentials, Permission::DeleteApplication)
        .await
        .is_none()
    {
        return Ok(());
    }

    match state.applications.delete(id).await {
        Ok(true) => println!("✓ Deleted application #{id}"),
        Ok(false) => println!("Application with ID {id} not found."),
        Err(e) => report(&e),
    }

    Ok(())
}

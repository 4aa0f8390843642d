//! CLI module - Command-line interface for LPG Connect
//!
//! Every invocation authenticates the `-u/-p` credentials afresh; the
//! resulting session decides which commands may run.

mod commands;

use clap::{Args, Parser, Subcommand};

/// LPG Connect - gas connection requests
/// Applicants submit requests, administrators review them
#[derive(Parser)]
#[command(name = "lpg-connect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Credentials {
    /// Account to act as
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for the account
    #[arg(short, long, global = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Create a new applicant account
    Register {
        #[arg(value_name = "USERNAME")]
        new_username: String,
        #[arg(value_name = "PASSWORD")]
        new_password: String,
    },

    /// Check credentials and show the account role
    Login,

    /// Submit a new connection request
    #[command(alias = "a")]
    Apply {
        /// Applicant full name
        #[arg(long, default_value = "")]
        name: String,
        /// 10-digit mobile number
        #[arg(long, default_value = "")]
        mobile: String,
        /// Installation address
        #[arg(long, default_value = "")]
        address: String,
        /// Number of connections requested
        #[arg(long, default_value = "")]
        connections: String,
    },

    /// List your own requests
    Mine,

    /// Show one request in full
    #[command(alias = "i")]
    Show {
        /// Application ID
        id: String,
    },

    /// List every request (admin)
    #[command(alias = "ls", alias = "l")]
    List {
        /// Only show requests with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Change the status of a request (admin)
    SetStatus {
        /// Application ID
        id: String,
        /// PENDING, APPROVED or REJECTED
        status: String,
    },

    /// Delete a request permanently (admin)
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        id: String,
    },

    /// List all accounts (admin)
    Users,

    /// Create an account with any role (admin)
    AddUser {
        #[arg(value_name = "USERNAME")]
        new_username: String,
        #[arg(value_name = "PASSWORD")]
        new_password: String,
        /// ADMIN or USER
        #[arg(long, default_value = "USER")]
        role: String,
    },

    /// Show request counters (admin)
    Stats,

    /// Report which storage backend is active
    Check,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn credentials_are_global() {
        let cli = Cli::try_parse_from([
            "lpg-connect",
            "set-status",
            "1001",
            "approved",
            "-u",
            "admin",
            "-p",
            "admin123",
        ])
        .unwrap();

        assert_eq!(cli.credentials.username.as_deref(), Some("admin"));
        assert_eq!(cli.credentials.password.as_deref(), Some("admin123"));
        assert!(matches!(
            cli.command,
            Commands::SetStatus { ref id, ref status } if id == "1001" && status == "approved"
        ));
    }

    #[test]
    fn register_takes_positional_credentials() {
        let cli = Cli::try_parse_from(["lpg-connect", "register", "alice", "pw1"]).unwrap();
        assert!(cli.credentials.username.is_none());
        assert!(matches!(
            cli.command,
            Commands::Register { ref new_username, ref new_password }
                if new_username == "alice" && new_password == "pw1"
        ));
    }

    #[test]
    fn apply_fields_default_to_empty() {
        let cli = Cli::try_parse_from(["lpg-connect", "apply", "--name", "Alice A"]).unwrap();
        let Commands::Apply {
            name,
            mobile,
            connections,
            ..
        } = cli.command
        else {
            panic!("expected apply");
        };
        assert_eq!(name, "Alice A");
        assert!(mobile.is_empty());
        assert!(connections.is_empty());
    }
}

//! CLI command definitions for the `barber` binary.
//!
//! Uses clap derive macros. Commands follow a verb-noun pattern
//! (`barber list clients`, `barber cancel appointment <id>`).

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod slot;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Barbershop booking backend.
#[derive(Parser)]
#[command(name = "barber", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to config, then 8080).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config, then 127.0.0.1).
        #[arg(long)]
        host: Option<String>,

        /// Export spans to OpenTelemetry (stdout exporter).
        #[arg(long, env = "BARBER_OTEL")]
        otel: bool,
    },

    /// Initialize data.
    Init {
        #[command(subcommand)]
        resource: InitResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Cancel a resource.
    Cancel {
        #[command(subcommand)]
        resource: CancelResource,
    },

    /// Booking status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum InitResource {
    /// Create the default Beard, Haircut, and Combo offerings if missing.
    Services,
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List registered clients.
    Clients,
    /// List service offerings.
    Services,
    /// List available slots.
    Slots {
        /// Only unbooked slots on this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
    },
    /// List appointments.
    Appointments,
}

#[derive(Subcommand)]
pub enum CancelResource {
    /// Cancel an appointment and free its slot.
    Appointment {
        /// Appointment id.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_slots_with_date() {
        let cli = Cli::try_parse_from(["barber", "list", "slots", "--date", "2025-06-01"]).unwrap();
        match cli.command {
            Commands::List {
                resource: ListResource::Slots { date },
            } => assert_eq!(date.as_deref(), Some("2025-06-01")),
            _ => panic!("expected list slots"),
        }
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["barber", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { port, host, .. } => {
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }
}

//! anvil - ConnectWise Manage API demo
//!
//! This binary runs a linear demo against a Manage instance: it verifies
//! connectivity, then walks through the read operations (account, companies,
//! tickets, members) printing formatted summaries.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `CWM_SERVER`: Manage server host (e.g. `na.myconnectwise.net`)
//! - `CWM_COMPANY`: company identifier
//! - `CWM_PUBLIC_KEY` / `CWM_PRIVATE_KEY`: API member keys
//! - `CWM_CLIENT_ID`: vendor-issued client ID
//!
//! # Write demos
//!
//! The mutating demos (create a ticket, add a note, log a time entry) are
//! compiled in but do not run by default. To exercise them against a sandbox
//! instance:
//!
//! ```bash
//! CWM_DEMO_WRITES=1 CWM_DEMO_BOARD_ID=1 ./anvil
//! ```
//!
//! `CWM_DEMO_WORK_TYPE_ID` and `CWM_DEMO_WORK_ROLE_ID` override the ids used
//! for the time entry demo (both default to 1).

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

use anvil::config::Config;
use anvil::cwm_client::{CwmClient, ListParams};
use anvil::error::AnvilError;
use anvil::models::{ChargeToType, Company, Member, NewNote, NewTicket, NewTimeEntry, Ticket};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logging goes to stderr; stdout is reserved for the demo output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("anvil=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(server = %config.server, "Configuration loaded");

    let client = CwmClient::new(&config).context("Failed to create Manage client")?;

    // Connectivity gate: a failure here terminates the whole demo
    match client.test_connection().await {
        Ok(info) => {
            println!("{}", "Successfully connected to ConnectWise Manage".green());
            println!("{}", format!("Version: {}", info.display_version()).green());
        }
        Err(e) => {
            eprintln!("{}", "Failed to connect to ConnectWise Manage".red());
            eprintln!(
                "{}",
                format!("Error: {}", e.sanitized_display(&config.private_key)).red()
            );
            eprintln!("Demo terminated due to connection failure.");
            std::process::exit(1);
        }
    }

    // Demo 1: my account
    print_section("My Account Information");
    let me = match client.my_account().await {
        Ok(me) => {
            println!("ID: {}", me.id);
            println!("Name: {}", me.full_name());
            println!("Email: {}", me.email_address.as_deref().unwrap_or("(none)"));
            Some(me)
        }
        Err(e) => {
            print_error("retrieving my account info", &e, &config);
            None
        }
    };

    // Demo 2: recent companies
    print_section("Recent Companies");
    let companies = match client
        .list_companies(ListParams::new().with_page_size(5))
        .await
    {
        Ok(companies) => {
            for company in &companies {
                println!("{}: {}", company.id, company.display_name());
            }
            companies
        }
        Err(e) => {
            print_error("retrieving companies", &e, &config);
            Vec::new()
        }
    };

    // Demo 3: recent service tickets
    print_section("Recent Tickets");
    match client
        .list_tickets(
            ListParams::new()
                .with_conditions("recordType='ServiceTicket'")
                .with_page_size(5),
        )
        .await
    {
        Ok(tickets) => {
            for ticket in &tickets {
                println!(
                    "Ticket #{}: {} - Status: {}",
                    ticket.id,
                    ticket.display_summary(),
                    ticket.display_status()
                );
            }
        }
        Err(e) => print_error("retrieving tickets", &e, &config),
    }

    // Demo 4: active members
    print_section("Active Members");
    match client
        .list_members(
            ListParams::new()
                .with_conditions("inactiveFlag=false")
                .with_page_size(5),
        )
        .await
    {
        Ok(members) => {
            for member in &members {
                println!(
                    "{}: {} ({})",
                    member.id,
                    member.full_name(),
                    member.display_identifier()
                );
            }
        }
        Err(e) => print_error("retrieving members", &e, &config),
    }

    // Demos 5-7 mutate data and only run when explicitly enabled
    if write_demos_enabled() {
        match demo_board_id() {
            Some(board_id) => {
                run_write_demos(&client, &config, companies.first(), me.as_ref(), board_id).await;
            }
            None => {
                eprintln!(
                    "{}",
                    "CWM_DEMO_WRITES is set but CWM_DEMO_BOARD_ID is missing - skipping write demos"
                        .yellow()
                );
            }
        }
    }

    println!("\n{}", "ConnectWise Manage API Demo Complete".green());

    Ok(())
}

/// Prints a cyan section header.
fn print_section(title: &str) {
    println!("\n{}", format!("=== {} ===", title).cyan());
}

/// Prints a red, sanitized error line for a failed operation.
fn print_error(action: &str, err: &AnvilError, config: &Config) {
    eprintln!(
        "{}",
        format!(
            "Error {}: {}",
            action,
            err.sanitized_display(&config.private_key)
        )
        .red()
    );
}

/// Returns true when the mutating demos are explicitly enabled.
fn write_demos_enabled() -> bool {
    std::env::var("CWM_DEMO_WRITES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Board id for the ticket creation demo.
fn demo_board_id() -> Option<i32> {
    std::env::var("CWM_DEMO_BOARD_ID").ok()?.parse().ok()
}

/// Reads an id override from the environment, with a fallback.
fn env_id(name: &str, default: i32) -> i32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Runs the mutating demos: create a ticket, add a note to it, then log a
/// time entry against it. Each step depends on the previous one succeeding.
async fn run_write_demos(
    client: &CwmClient,
    config: &Config,
    company: Option<&Company>,
    me: Option<&Member>,
    board_id: i32,
) {
    // Reuse the first company from the earlier read demo
    let Some(company) = company else {
        eprintln!(
            "{}",
            "No company available from the read demos - skipping write demos".yellow()
        );
        return;
    };

    // Demo 5: create a ticket
    print_section("Create a Test Ticket");
    let ticket: Option<Ticket> = match client
        .create_ticket(
            &NewTicket::new("API Test Ticket", company.id, board_id)
                .with_initial_description("This is a test ticket created via the API."),
        )
        .await
    {
        Ok(ticket) => {
            println!(
                "{}",
                format!("Successfully created ticket #{}", ticket.id).green()
            );
            println!("View: {}", client.ticket_web_url(ticket.id));
            Some(ticket)
        }
        Err(e) => {
            print_error("creating ticket", &e, config);
            None
        }
    };

    let Some(ticket) = ticket else {
        return;
    };

    // Demo 6: add a note to the ticket
    print_section("Add a Note to the Ticket");
    match client
        .add_ticket_note(
            ticket.id,
            &NewNote::new("This is a test note added via the API."),
        )
        .await
    {
        Ok(note) => {
            println!(
                "{}",
                format!("Successfully added note #{} to ticket #{}", note.id, ticket.id).green()
            );
        }
        Err(e) => print_error("adding ticket note", &e, config),
    }

    // Demo 7: log a time entry against the ticket
    let Some(me) = me else {
        eprintln!(
            "{}",
            "My account info unavailable - skipping the time entry demo".yellow()
        );
        return;
    };

    print_section("Add a Time Entry to the Ticket");
    let time_end = Utc::now();
    let time_start = time_end - chrono::Duration::hours(1);
    let hours = (time_end - time_start).num_seconds() as f64 / 3600.0;

    match client
        .create_time_entry(
            &NewTimeEntry::new(
                company.id,
                ticket.id,
                ChargeToType::ServiceTicket,
                me.id,
                time_start,
                time_end,
                hours,
                env_id("CWM_DEMO_WORK_TYPE_ID", 1),
                env_id("CWM_DEMO_WORK_ROLE_ID", 1),
            )
            .with_notes("Test time entry via API"),
        )
        .await
    {
        Ok(entry) => {
            println!(
                "{}",
                format!("Successfully created time entry #{}", entry.id).green()
            );
        }
        Err(e) => print_error("creating time entry", &e, config),
    }
}

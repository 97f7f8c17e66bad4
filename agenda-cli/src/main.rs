mod commands;
mod logging;
mod render;
mod session;

use agenda_core::config::AgendaConfig;
use agenda_core::{CalendarId, EventId};
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Pick the calendars you're looking at and manage their events")]
struct Cli {
    /// Calendar to select when nothing else is remembered (overrides config)
    #[arg(long, global = true)]
    default: Option<CalendarId>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the selected calendars and their events
    Show {
        /// Print the selection and events as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every calendar, marking the selected ones
    Calendars {
        #[arg(long)]
        json: bool,
    },
    /// Select calendars by id, in display order
    Select {
        #[arg(required = true)]
        ids: Vec<CalendarId>,
    },
    /// Add a created calendar (JSON record, or @path to a JSON file)
    AddCalendar { record: String },
    /// Apply an updated calendar record
    UpdateCalendar { record: String },
    /// Add a created event to its calendar
    AddEvent { record: String },
    /// Merge changed event fields into the stored event
    UpdateEvent { record: String },
    /// Remove an event
    DeleteEvent { id: EventId },
    /// Show where agenda keeps its files
    Config {
        /// Remember this calendar as the default in the config file
        #[arg(long)]
        set_default: Option<CalendarId>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = AgendaConfig::load()?;
    let open = |config: &AgendaConfig| Session::open(config, cli.default);

    match cli.command {
        Commands::Show { json } => commands::show::run(&open(&config)?, json),
        Commands::Calendars { json } => commands::calendars::run(&open(&config)?, json),
        Commands::Select { ids } => commands::select::run(&mut open(&config)?, &ids),
        Commands::AddCalendar { record } => commands::calendar::add(&mut open(&config)?, &record),
        Commands::UpdateCalendar { record } => {
            commands::calendar::update(&mut open(&config)?, &record)
        }
        Commands::AddEvent { record } => commands::event::add(&mut open(&config)?, &record),
        Commands::UpdateEvent { record } => commands::event::update(&mut open(&config)?, &record),
        Commands::DeleteEvent { id } => commands::event::delete(&mut open(&config)?, &id),
        Commands::Config { set_default } => commands::config::run(&mut config, set_default),
    }
}

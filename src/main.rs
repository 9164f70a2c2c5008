use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nas_score::access::{self, AccessError, AccessSession};
use nas_score::catalog::{Catalog, Selection};
use nas_score::config::Config;
use nas_score::export::{self, ExportError};
use nas_score::history::{self, EvaluationForm, HistoryError, PatientStatus, Shift, Unit};
use nas_score::output;
use nas_score::scoring;
use nas_score::store::{DiskStore, KeyValueStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_ACCESS: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_NO_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List facilities with their access-key hints
    Facilities,
    /// Log in to a facility using its initials as the access key
    Login {
        /// Facility name or its number in `nas facilities`
        facility: String,
        /// Access key; prompted for when omitted
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Forget the current session
    Logout,
    /// Show the facility currently logged in
    Status,
    /// Show the NAS item checklist
    Catalog,
    /// Score a selection without saving it
    Score {
        /// Item codes, toggled in order (exclusive groups keep the last one)
        codes: Vec<String>,
    },
    /// Score and save an evaluation for the current facility
    Submit {
        /// Item codes, toggled in order (exclusive groups keep the last one)
        codes: Vec<String>,
        /// Patient identifier (RUT or other)
        #[arg(short, long)]
        identifier: Option<String>,
        /// Shift: Día or Noche
        #[arg(short, long)]
        shift: Option<Shift>,
        /// Patient status: N/A, Ingreso or Egreso
        #[arg(short, long)]
        patient_status: Option<PatientStatus>,
        /// Unit: UCI or UTI
        #[arg(short, long)]
        unit: Option<Unit>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Evaluation date and time, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Start from the most recent evaluation; given codes toggle on top of it
        #[arg(long)]
        from_last: bool,
    },
    /// Show the most recent evaluation
    Last,
    /// Show saved evaluations, newest first
    History {
        /// Only show this many evaluations
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Export the facility's history as CSV
    Export {
        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "nas")]
#[command(about = "Nursing Activities Score recorder", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/nas-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding sessions and histories
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,nas_score=debug,nas=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print the error and exit with the code matching its kind
fn fail(err: anyhow::Error) -> ! {
    let code = if err.downcast_ref::<AccessError>().is_some() {
        EXIT_ACCESS
    } else if err.downcast_ref::<HistoryError>().is_some()
        || err.downcast_ref::<ExportError>().is_some()
    {
        EXIT_NO_DATA
    } else {
        EXIT_STORAGE
    };

    eprintln!("{:#}", err);
    std::process::exit(code);
}

fn require_session(store: &DiskStore) -> AccessSession {
    match access::current_session(store) {
        Ok(Some(session)) => session,
        Ok(None) => {
            eprintln!("Not logged in. Run `nas login <facility>` first.");
            std::process::exit(EXIT_ACCESS);
        }
        Err(e) => fail(e),
    }
}

/// Apply each code as a checkbox toggle; unknown codes are reported and skipped
fn resolve_selection(catalog: &Catalog, start: Selection, codes: &[String]) -> Selection {
    codes.iter().fold(start, |selection, code| {
        if catalog.contains(code) {
            catalog.groups().toggle(code, &selection)
        } else {
            eprintln!("Ignoring unknown item code '{}'", code);
            selection
        }
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load and validate config
    let config_path = cli.config.map(PathBuf::from);
    let config = match nas_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = nas_score::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalog = match config.build_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut store = DiskStore::open(config.store_path(cli.data_dir));
    tracing::debug!(path = %store.path().display(), "opened store");

    match history::migrate_legacy(&mut store) {
        Ok(report) if report.migrated > 0 => {
            tracing::info!(
                migrated = report.migrated,
                facilities = report.keys.len(),
                "moved legacy history into per-facility histories"
            );
        }
        Ok(_) => {}
        Err(e) => fail(e),
    }

    let use_colors = output::should_use_colors();

    let result = match cli.command {
        Commands::Facilities => {
            let current = match access::current_session(&store) {
                Ok(session) => session.map(|s| s.facility),
                Err(e) => {
                    tracing::warn!("could not read session: {:#}", e);
                    None
                }
            };
            println!(
                "{}",
                output::format_facilities(&config.facilities(), current.as_deref(), use_colors)
            );
            Ok(())
        }
        Commands::Login { facility, key } => run_login(&mut store, &config, &facility, key),
        Commands::Logout => access::logout(&mut store).map(|_| println!("Logged out.")),
        Commands::Status => {
            let session = require_session(&store);
            println!(
                "Logged in to {} since {}",
                session.facility,
                session
                    .timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            );
            Ok(())
        }
        Commands::Catalog => {
            println!("{}", output::format_catalog(&catalog.entries(), None, use_colors));
            Ok(())
        }
        Commands::Score { codes } => {
            let selection = resolve_selection(&catalog, Selection::new(), &codes);
            let ordered = catalog.ordered_codes(&selection);
            let result = scoring::calculate_score(&catalog, &ordered);
            if cli.verbose {
                println!(
                    "{}",
                    output::format_catalog(&catalog.entries(), Some(&selection), use_colors)
                );
                println!();
            }
            println!("{}", output::format_score_breakdown(&result, use_colors));
            Ok(())
        }
        Commands::Submit {
            codes,
            identifier,
            shift,
            patient_status,
            unit,
            note,
            at,
            from_last,
        } => {
            let session = require_session(&store);

            if let Some(ref raw) = at {
                if let Err(e) = history::parse_created_at(raw) {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }

            let base = if from_last {
                match history::latest(&store, &session.facility) {
                    Ok(record) => EvaluationForm::from_record(&record),
                    Err(e) => fail(e),
                }
            } else {
                EvaluationForm::default()
            };

            let form = EvaluationForm {
                created_at: at.or(base.created_at),
                identifier: identifier.or(base.identifier),
                shift: shift.unwrap_or(base.shift),
                patient_status: patient_status.unwrap_or(base.patient_status),
                unit: unit.unwrap_or(base.unit),
                note: note.or(base.note),
                selection: resolve_selection(&catalog, base.selection, &codes),
            };

            run_submit(&mut store, &catalog, &session, form, use_colors)
        }
        Commands::Last => {
            let session = require_session(&store);
            history::latest(&store, &session.facility)
                .map(|record| println!("{}", output::format_record_detail(&record, use_colors)))
        }
        Commands::History { limit } => {
            let session = require_session(&store);
            history::list(&store, &session.facility).map(|records| {
                let shown = limit.unwrap_or(records.len()).min(records.len());
                println!(
                    "{}",
                    output::format_history_table(&records[..shown], use_colors)
                );
                if cli.verbose {
                    eprintln!("Showing {} of {} evaluations", shown, records.len());
                }
            })
        }
        Commands::Export { out } => {
            let session = require_session(&store);
            run_export(&store, &session, &out)
        }
    };

    if let Err(e) = result {
        fail(e);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_login(
    store: &mut DiskStore,
    config: &Config,
    facility: &str,
    key: Option<String>,
) -> Result<()> {
    let facilities = config.facilities();
    let Some(facility) = access::resolve_facility(facility, &facilities) else {
        eprintln!(
            "Unknown facility '{}'. Run `nas facilities` to see the list.",
            facility
        );
        std::process::exit(EXIT_CONFIG);
    };

    let passphrase = access::read_passphrase(facility, key)?;
    let session = access::authenticate(store, facility, &passphrase, Utc::now())?;
    println!("Logged in to {}", session.facility);
    Ok(())
}

fn run_submit<S: KeyValueStore>(
    store: &mut S,
    catalog: &Catalog,
    session: &AccessSession,
    form: EvaluationForm,
    use_colors: bool,
) -> Result<()> {
    let record = form.into_record(&session.facility, catalog, Local::now().naive_local())?;
    let summary = output::format_record_detail(&record, use_colors);
    history::append(store, &session.facility, record)?;

    println!("{}", summary);
    println!("Evaluation saved.");
    Ok(())
}

fn run_export<S: KeyValueStore>(store: &S, session: &AccessSession, out: &std::path::Path) -> Result<()> {
    let export = export::export_csv(store, &session.facility, Local::now().date_naive())?;
    let path = export::write_export(&export, out)?;
    println!("Exported {} evaluations to {}", export.rows, path.display());
    Ok(())
}

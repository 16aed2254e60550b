//! rollstore CLI
//!
//! Command-line interface for adding, listing, finding, updating and deleting
//! student records.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rollstore::config::DEFAULT_DATA_FILE;
use rollstore::{Config, Outcome, RecordStore, Student, SyncStrategy};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// rollstore CLI
#[derive(Parser, Debug)]
#[command(name = "rollstore-cli")]
#[command(about = "Manage student records stored in a fixed-width data file")]
#[command(version)]
struct Args {
    /// Data file holding the records
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Scratch file used by delete (default: temp_records.dat next to the data file)
    #[arg(long)]
    temp_file: Option<PathBuf>,

    /// Refuse to add a roll number that already exists
    #[arg(long)]
    unique: bool,

    /// Do not fsync after writes
    #[arg(long)]
    no_sync: bool,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new student record
    Add {
        /// Roll number (positive integer)
        #[arg(long)]
        roll: i32,

        /// Student name (stored up to 49 bytes)
        #[arg(long)]
        name: String,

        /// Class or grade, e.g. "10th Grade" (stored up to 29 bytes)
        #[arg(long)]
        class: String,

        /// Address (stored up to 99 bytes)
        #[arg(long, default_value = "")]
        address: String,

        /// Total score (non-negative)
        #[arg(long)]
        score: f32,

        /// Mark the fee as paid
        #[arg(long)]
        paid: bool,
    },

    /// List every student record
    List,

    /// Show the student with a roll number
    Find {
        /// Roll number to search for
        roll: i32,
    },

    /// Change a student's score and fee status
    Update {
        /// Roll number of the student to modify
        roll: i32,

        /// New total score
        #[arg(long)]
        score: f32,

        /// Mark the fee as paid
        #[arg(long, conflicts_with = "unpaid", required_unless_present = "unpaid")]
        paid: bool,

        /// Mark the fee as not paid
        #[arg(long)]
        unpaid: bool,
    },

    /// Delete the student with a roll number
    Delete {
        /// Roll number of the student to delete
        roll: i32,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, so stdout stays clean for --json)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rollstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> rollstore::Result<ExitCode> {
    let mut builder = Config::builder()
        .data_path(&args.data_file)
        .enforce_unique_keys(args.unique);
    if let Some(temp) = &args.temp_file {
        builder = builder.temp_path(temp);
    }
    if args.no_sync {
        builder = builder.sync_strategy(SyncStrategy::OsBuffered);
    }

    let store = RecordStore::open(builder.build())?;
    let json = args.json;

    match args.command {
        Commands::Add {
            roll,
            name,
            class,
            address,
            score,
            paid,
        } => {
            let student = Student::new(roll, name, class, address, score, paid);
            store.append(&student)?;
            println!(
                "[SUCCESS] Student record for {} (Roll No: {}) added successfully!",
                student.name, student.roll_number
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::List => {
            if json {
                let records = store.scan_all()?.collect::<rollstore::Result<Vec<_>>>()?;
                print_json(&records);
                return Ok(ExitCode::SUCCESS);
            }

            let mut count = 0usize;
            for student in store.scan_all()? {
                println!("{}", student?);
                count += 1;
            }
            if count == 0 {
                println!("[INFO] No student records found.");
            } else {
                println!("\nTotal records found: {}", count);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Find { roll } => match store.find_by_key(roll)? {
            Some(student) if json => {
                print_json(&student);
                Ok(ExitCode::SUCCESS)
            }
            Some(student) => {
                println!("{}", student);
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(not_found(roll)),
        },

        Commands::Update { roll, score, paid, .. } => {
            match store.set_score_and_fee(roll, score, paid)? {
                Outcome::Found => {
                    println!("[SUCCESS] Record for Roll No {} updated successfully!", roll);
                    Ok(ExitCode::SUCCESS)
                }
                Outcome::NotFound => Ok(not_found(roll)),
            }
        }

        Commands::Delete { roll } => match store.delete_by_key(roll)? {
            Outcome::Found => {
                println!(
                    "[SUCCESS] Student record for Roll No {} deleted successfully.",
                    roll
                );
                Ok(ExitCode::SUCCESS)
            }
            Outcome::NotFound => Ok(not_found(roll)),
        },
    }
}

fn not_found(roll: i32) -> ExitCode {
    println!("[INFO] Student with Roll Number {} not found.", roll);
    ExitCode::FAILURE
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("Failed to encode JSON: {}", e),
    }
}

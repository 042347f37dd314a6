use clap::{Parser, Subcommand};
use namaste_core::{CoreConfig, DiagnosisEntry, MapperService, Resolution};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "namaste")]
#[command(about = "NAMASTE / ICD-11 diagnosis mapper CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known diagnoses
    List,
    /// Suggest diagnosis names for a partial query
    Suggest {
        /// Partial diagnosis name
        query: String,
        /// Maximum number of suggestions (default from NAMASTE_MAX_SUGGESTIONS)
        #[arg(long)]
        max: Option<usize>,
    },
    /// Show the codes for a diagnosis
    Resolve {
        /// Diagnosis name (case and surrounding whitespace are ignored)
        name: String,
    },
    /// Resolve a diagnosis and confirm it
    Confirm {
        /// Diagnosis name (case and surrounding whitespace are ignored)
        name: String,
    },
}

fn print_entry(entry: &DiagnosisEntry) {
    println!("Diagnosis:          {}", entry.name);
    println!("NAMASTE code:       {}", entry.namaste_code);
    println!("ICD-11 TM2 code:    {}", entry.icd11_tm2_code);
    println!("ICD-11 Biomed code: {}", entry.icd11_biomed_code);
}

/// Run one command. Returns `false` when the named diagnosis could not be resolved or confirmed.
fn run(command: Option<Commands>, cfg: &CoreConfig, service: &MapperService) -> bool {
    match command {
        Some(Commands::List) => {
            for name in service.vocabulary().names() {
                println!("{}", name);
            }
        }
        Some(Commands::Suggest { query, max }) => {
            let suggestions = service.suggest(&query, cfg.effective_max_suggestions(max));
            if suggestions.is_empty() {
                println!("No suggestions for \"{}\".", query);
            } else {
                for suggestion in suggestions {
                    println!("{}", suggestion);
                }
            }
        }
        Some(Commands::Resolve { name }) => match service.resolve(&name) {
            Resolution::Found(resolved) => print_entry(resolved.entry()),
            Resolution::NotFound => {
                eprintln!(
                    "No ICD-11 codes found for \"{}\". Please try a different diagnosis.",
                    name
                );
                return false;
            }
        },
        Some(Commands::Confirm { name }) => match service.resolve(&name) {
            Resolution::Found(resolved) => match service.confirm_with_receipt(&resolved) {
                Ok(receipt) => {
                    print_entry(&receipt.entry);
                    println!(
                        "Confirmed {} at {}",
                        receipt.id,
                        receipt.confirmed_at.to_rfc3339()
                    );
                }
                Err(e) => {
                    eprintln!("Error confirming diagnosis: {}", e);
                    return false;
                }
            },
            Resolution::NotFound => {
                eprintln!(
                    "Cannot confirm \"{}\": no matching diagnosis. Use 'namaste suggest' to find one.",
                    name
                );
                return false;
            }
        },
        None => {
            println!("Use 'namaste --help' for commands");
        }
    }

    true
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = CoreConfig::from_env_lookup(|name| std::env::var(name).ok())?;
    let service = MapperService::new(cfg.load_vocabulary()?, Arc::new(cfg.confirmation_log()));

    if run(cli.command, &cfg, &service) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

use clap::{Args, Subcommand, ValueEnum};
use medtrack_core::Person;

use crate::config::Config;
use crate::models::MedicationArg;
use crate::sync::SyncClient;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct PersonCommand {
    #[command(subcommand)]
    pub command: PersonSubcommand,
}

#[derive(Subcommand)]
pub enum PersonSubcommand {
    /// Add a person and save them to the server
    Add {
        /// Name of the person
        name: String,

        /// Medication as NAME:FREQ[:REFILL_DATE] (can be repeated, at most 5)
        #[arg(long = "med", value_name = "MEDICATION")]
        medications: Vec<MedicationArg>,
    },

    /// List everyone stored on the server
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one person's medications
    Show {
        /// Name of the person
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl PersonCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let client = SyncClient::from_config(config)?;
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            PersonSubcommand::Add { name, medications } => {
                let person = build_person(name, medications);
                let count = person.medications().len();

                let receipt = rt.block_on(client.add_person(person))?;

                match receipt.user_id {
                    Some(id) => println!("Added {} with {} medication(s) (id {})", name, count, id),
                    None => println!("Added {} with {} medication(s)", name, count),
                }
                Ok(())
            }

            PersonSubcommand::List { format } => {
                let people = rt.block_on(client.load_people())?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&people)?);
                    }
                    OutputFormat::Text => {
                        if people.is_empty() {
                            println!("No people found.");
                            return Ok(());
                        }
                        for (i, person) in people.iter().enumerate() {
                            if i > 0 {
                                println!();
                            }
                            print!("{}", person);
                        }
                        println!("\nTotal: {} person(s)", people.len());
                    }
                }
                Ok(())
            }

            PersonSubcommand::Show { name, format } => {
                let person = rt
                    .block_on(client.find_person(name))?
                    .ok_or_else(|| format!("Person not found: {}", name))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&person)?);
                    }
                    OutputFormat::Text => print!("{}", person),
                }
                Ok(())
            }
        }
    }
}

/// Builds a person from command-line medications. Medications past the
/// per-person limit are reported and skipped.
fn build_person(name: &str, medications: &[MedicationArg]) -> Person {
    let mut person = Person::new(name);

    for arg in medications {
        if let Err(e) = person.add_medication(arg.to_medication()) {
            eprintln!("Skipping {}: {}", arg, e);
        }
    }

    person
}

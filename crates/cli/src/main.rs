use clap::{Parser, Subcommand};
use pmr_core::{config, CoreConfig, PatientService, SortField, SortOrder};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pmr")]
#[command(about = "PMR patient registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show a single patient
    Show {
        /// Patient ID, e.g. P001
        id: String,
    },
    /// List patients ordered by a numeric field
    Sort {
        /// Field to sort on: height, weight or bmi
        sort_by: String,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Delete a patient
    Delete {
        /// Patient ID, e.g. P001
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let data_file = config::data_file_from_env_value(std::env::var("PMR_DATA_FILE").ok());
    let cfg = CoreConfig::new(data_file)?;
    let service = PatientService::new(Arc::new(cfg));

    match cli.command {
        Some(Commands::List) => {
            let patients = service.list()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for (id, patient) in patients {
                    println!(
                        "ID: {}, Name: {}, City: {}, Age: {}, BMI: {} ({})",
                        id, patient.name, patient.city, patient.age, patient.bmi, patient.verdict
                    );
                }
            }
        }
        Some(Commands::Show { id }) => match service.fetch(&id) {
            Ok(patient) => {
                println!("Name:    {}", patient.name);
                println!("City:    {}", patient.city);
                println!("Age:     {}", patient.age);
                println!("Gender:  {}", patient.gender);
                println!("Height:  {} m", patient.height);
                println!("Weight:  {} kg", patient.weight);
                println!("BMI:     {} ({})", patient.bmi, patient.verdict);
            }
            Err(e) => eprintln!("Error fetching patient: {}", e),
        },
        Some(Commands::Sort { sort_by, order }) => {
            let field = sort_by.parse::<SortField>()?;
            let order = order.parse::<SortOrder>()?;
            for patient in service.sorted(field, order)? {
                println!(
                    "Name: {}, Height: {}, Weight: {}, BMI: {} ({})",
                    patient.name, patient.height, patient.weight, patient.bmi, patient.verdict
                );
            }
        }
        Some(Commands::Delete { id }) => match service.remove(&id) {
            Ok(()) => println!("Deleted patient {}", id.to_uppercase()),
            Err(e) => eprintln!("Error deleting patient: {}", e),
        },
        None => {
            println!("pmr: no command given, try --help");
        }
    }

    Ok(())
}

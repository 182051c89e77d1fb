use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{
    apply_mutation, load_settings, view::PatientListView, PatientListController, PatientMutation,
    PatientsClient, RefreshOutcome, Route,
};
use shared::{
    domain::{BedId, PatientId},
    protocol::NewPatient,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "patient-records", about = "List, search, add and delete patient records")]
struct Args {
    /// Backend base url, e.g. http://localhost:3000
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./patient_records.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the patient list, optionally filtered by name, id or diagnosis.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    Add(AddArgs),
    Delete {
        patient_id: i64,
    },
    /// Print one patient and the monitor route for it.
    Show {
        patient_id: i64,
    },
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: u32,
    #[arg(long)]
    gender: String,
    #[arg(long)]
    diagnosis: String,
    /// YYYY-MM-DD
    #[arg(long)]
    admission_date: String,
    #[arg(long)]
    bed_id: Option<i64>,
}

impl From<AddArgs> for NewPatient {
    fn from(value: AddArgs) -> Self {
        Self {
            patient_name: value.name,
            age: value.age,
            gender: value.gender,
            diagnosis: value.diagnosis,
            admission_date: value.admission_date,
            bed_id: value.bed_id.map(BedId),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())
        .context("failed to load settings")?
        .with_server_url(args.server_url)
        .context("invalid --server-url")?;
    let client = PatientsClient::from_settings(&settings).context("failed to build http client")?;

    let mut controller = PatientListController::new();
    load_initial(&mut controller, &client).await?;

    match args.command {
        Command::List { search, json } => {
            controller.set_search_text(search);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(controller.filtered_records())?
                );
            } else {
                print!(
                    "{}",
                    render::render_list(&PatientListView::from_controller(&controller))
                );
            }
        }
        Command::Add(add) => {
            let mutation = PatientMutation::Create(add.into());
            run_mutation(&mut controller, &client, mutation).await?;
            println!("Patient added.");
            print!(
                "{}",
                render::render_list(&PatientListView::from_controller(&controller))
            );
        }
        Command::Delete { patient_id } => {
            let patient_id = PatientId(patient_id);
            let name = controller
                .find(patient_id)
                .map(|record| record.patient_name.clone())
                .unwrap_or_else(|| format!("#{patient_id}"));
            let mutation = PatientMutation::Delete { patient_id };
            run_mutation(&mut controller, &client, mutation).await?;
            println!("Deleted {name}.");
            print!(
                "{}",
                render::render_list(&PatientListView::from_controller(&controller))
            );
        }
        Command::Show { patient_id } => {
            let patient_id = PatientId(patient_id);
            let Some(record) = controller.find(patient_id) else {
                bail!("patient {patient_id} not found");
            };
            print!("{}", render::render_detail(record));
            println!("Monitor: {}", Route::dashboard(patient_id));
        }
    }

    Ok(())
}

async fn load_initial(controller: &mut PatientListController, client: &PatientsClient) -> Result<()> {
    if controller.refresh(client).await == RefreshOutcome::Failed {
        let reason = controller.last_error().unwrap_or("unknown error");
        bail!(
            "failed to fetch patients from {}: {reason}",
            client.server_url()
        );
    }
    Ok(())
}

async fn run_mutation(
    controller: &mut PatientListController,
    client: &PatientsClient,
    mutation: PatientMutation,
) -> Result<()> {
    apply_mutation(client, &mutation, &controller.refresh_handle())
        .await
        .with_context(|| format!("{} failed", mutation.label()))?;

    if controller.refresh_if_requested(client).await == Some(RefreshOutcome::Failed) {
        tracing::warn!("patient list could not be refreshed after {}", mutation.label());
    }
    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use clinident_client::{
    ApiClient, BanksApi, DoctorsApi, PatientsApi, ProductsApi, RolesApi, UsersApi,
};
use clinident_core::format::format_currency;
use clinident_core::{ApiConfig, DirectorySink, ExportFormat, Exporter};
use clinident_model::{Doctor, Exportable};
use clinident_store::{
    BankStore, DoctorStore, PatientStore, PaymentBackend, ProductStore, SpecialistPaymentWizard,
    TracingNotifier,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "clinident")]
#[command(about = "Clinident dental clinic management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Patient registry
    Patients {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Doctor registry, with its linked user accounts
    Doctors {
        #[command(subcommand)]
        action: DoctorAction,
    },
    /// Treatment and service catalogue
    Products {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Bank catalogue
    Banks {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Register a specialist payment against a cobranza
    Pay {
        /// Patient id the proforma belongs to
        #[arg(long)]
        patient_id: i64,
        /// Doctor being paid
        #[arg(long)]
        doctor_id: i64,
        /// Proforma of the treatment
        #[arg(long)]
        proforma_id: i64,
        /// Cobranza the payment settles
        #[arg(long)]
        cobranza_id: i64,
        /// Amount to pay
        #[arg(long)]
        amount: f64,
        /// Ledger description (optional)
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum EntityAction {
    /// List all records
    List,
    /// Export as csv, json or xlsx into a directory
    Export {
        /// Output format (csv, json, xlsx)
        #[arg(long, default_value = "csv")]
        format: String,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out: String,
    },
    /// Delete a record by id
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum DoctorAction {
    /// List all doctors
    List,
    /// Export as csv, json or xlsx into a directory
    Export {
        /// Output format (csv, json, xlsx)
        #[arg(long, default_value = "csv")]
        format: String,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out: String,
    },
    /// Create a doctor together with its user account
    Create {
        /// Document number
        #[arg(long)]
        documento: String,
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        apellido: String,
        #[arg(long)]
        especialidad: String,
        /// Role id for the linked user account
        #[arg(long)]
        rol_id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telefono: Option<String>,
    },
    /// Delete a doctor by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinident=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?;
    let client = ApiClient::new(config);
    let notifier = Arc::new(TracingNotifier);

    match cli.command {
        Commands::Patients { action } => {
            let mut store = PatientStore::new(PatientsApi::new(client), notifier);
            match action {
                EntityAction::List => {
                    store.load().await?;
                    for p in store.items() {
                        println!(
                            "{:>5}  {:<12}  {}",
                            p.id.unwrap_or_default(),
                            p.numero_documento,
                            p.display_name()
                        );
                    }
                }
                EntityAction::Export { format, out } => {
                    store.load().await?;
                    export(store.items(), &format, &out)?;
                }
                EntityAction::Delete { id } => {
                    store.load().await?;
                    store.delete(id).await?;
                    println!("Paciente {id} eliminado");
                }
            }
        }
        Commands::Doctors { action } => {
            let mut store = DoctorStore::new(
                DoctorsApi::new(client.clone()),
                UsersApi::new(client.clone()),
                RolesApi::new(client),
                notifier,
            );
            match action {
                DoctorAction::List => {
                    store.load().await?;
                    for d in store.items() {
                        println!(
                            "{:>5}  {:<12}  {:<30}  {}",
                            d.id.unwrap_or_default(),
                            d.numero_documento,
                            d.display_name(),
                            d.especialidad
                        );
                    }
                }
                DoctorAction::Export { format, out } => {
                    store.load().await?;
                    export(store.items(), &format, &out)?;
                }
                DoctorAction::Create {
                    documento,
                    nombre,
                    apellido,
                    especialidad,
                    rol_id,
                    email,
                    telefono,
                } => {
                    let created = store
                        .create(Doctor {
                            id: None,
                            numero_documento: documento,
                            nombre,
                            apellido,
                            email,
                            telefono,
                            direccion: None,
                            especialidad,
                            rol_id: Some(rol_id),
                            usuario_id: None,
                            password: None,
                        })
                        .await?;
                    println!(
                        "Médico {} creado (cuenta de usuario {})",
                        created.id.unwrap_or_default(),
                        created.usuario_id.unwrap_or_default()
                    );
                }
                DoctorAction::Delete { id } => {
                    store.load().await?;
                    store.delete(id).await?;
                    println!("Médico {id} eliminado");
                }
            }
        }
        Commands::Products { action } => {
            let mut store = ProductStore::new(ProductsApi::new(client), notifier);
            match action {
                EntityAction::List => {
                    store.load().await?;
                    for p in store.items() {
                        println!(
                            "{:>5}  {:<10}  {:<40}  {}",
                            p.id.unwrap_or_default(),
                            p.codigo,
                            p.nombre,
                            format_currency(p.precio)
                        );
                    }
                }
                EntityAction::Export { format, out } => {
                    store.load().await?;
                    export(store.items(), &format, &out)?;
                }
                EntityAction::Delete { id } => {
                    store.load().await?;
                    store.delete(id).await?;
                    println!("Producto {id} eliminado");
                }
            }
        }
        Commands::Banks { action } => {
            let mut store = BankStore::new(BanksApi::new(client), notifier);
            match action {
                EntityAction::List => {
                    store.load().await?;
                    for b in store.items() {
                        println!(
                            "{:>5}  {:<30}  {}",
                            b.id.unwrap_or_default(),
                            b.nombre,
                            b.numero_cuenta.as_deref().unwrap_or("-")
                        );
                    }
                }
                EntityAction::Export { format, out } => {
                    store.load().await?;
                    export(store.items(), &format, &out)?;
                }
                EntityAction::Delete { id } => {
                    store.load().await?;
                    store.delete(id).await?;
                    println!("Banco {id} eliminado");
                }
            }
        }
        Commands::Pay {
            patient_id,
            doctor_id,
            proforma_id,
            cobranza_id,
            amount,
            description,
        } => {
            pay(
                client, notifier, patient_id, doctor_id, proforma_id, cobranza_id, amount,
                description,
            )
            .await?;
        }
    }

    Ok(())
}

fn export<T: Exportable>(items: &[T], format: &str, out: &str) -> anyhow::Result<()> {
    let format: ExportFormat = format.parse()?;
    let mut exporter = Exporter::new(DirectorySink::new(out));
    let filename = exporter.export_entity(items, format)?;
    println!("Exportado a {out}/{filename}");
    Ok(())
}

/// Drive the payment wizard end to end from command-line ids.
#[allow(clippy::too_many_arguments)]
async fn pay(
    client: ApiClient,
    notifier: Arc<TracingNotifier>,
    patient_id: i64,
    doctor_id: i64,
    proforma_id: i64,
    cobranza_id: i64,
    amount: f64,
    description: Option<String>,
) -> anyhow::Result<()> {
    let mut wizard = SpecialistPaymentWizard::new(PaymentBackend::new(client), notifier);
    wizard.load_base_data().await?;

    let patient = wizard
        .filtered_patients()
        .into_iter()
        .find(|p| p.id == Some(patient_id))
        .with_context(|| format!("paciente {patient_id} no encontrado"))?;
    wizard.select_patient(patient);
    wizard.next_step().await?;

    let doctor = wizard
        .filtered_doctors()
        .into_iter()
        .find(|d| d.id == Some(doctor_id))
        .with_context(|| format!("médico {doctor_id} no encontrado"))?;
    wizard.select_doctor(doctor);
    wizard.next_step().await?;

    let proforma = wizard
        .filtered_proformas()
        .into_iter()
        .find(|p| p.id == Some(proforma_id))
        .with_context(|| format!("proforma {proforma_id} no encontrada"))?;
    wizard.select_proforma(proforma);
    wizard.next_step().await?;

    let cobranza = wizard
        .cobranzas()
        .iter()
        .find(|c| c.id == Some(cobranza_id))
        .cloned()
        .with_context(|| format!("cobranza {cobranza_id} no encontrada"))?;
    wizard.select_cobranza(cobranza);
    wizard.next_step().await?;

    wizard.amount = Some(amount);
    if let Some(description) = description {
        wizard.description = description;
    }

    let movement = wizard.process_payment().await?;
    println!(
        "Pago {} registrado: {}",
        movement.id.unwrap_or_default(),
        format_currency(movement.monto)
    );
    Ok(())
}

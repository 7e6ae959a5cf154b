use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

mod advice;
mod error;
mod export;
mod filter;
mod models;
mod report;
mod scoring;
mod session;
mod store;
mod suggest;

use advice::RecommendationPlan;
use error::DashboardError;
use models::{CheckInInput, CheckInRecord, Conflicts, FilterCriteria, Role, Workload};

#[derive(Parser)]
#[command(name = "teamassist-wellbeing")]
#[command(about = "Wellbeing check-in scoring and HR review for TeamAssist", long_about = None)]
struct Cli {
    /// Output machine-readable JSON where supported
    #[arg(long, global = true)]
    json: bool,
    /// Name of the collected store table
    #[arg(long, global = true, default_value = "check_ins")]
    table: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the collected store schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Score one check-in and print its action plan
    CheckIn {
        #[arg(long, default_value = "Project team")]
        organization: String,
        #[arg(long, value_enum, default_value = "collaborator")]
        role: Role,
        /// Mood from 1 (very low) to 5 (excellent)
        #[arg(long)]
        mood: i64,
        #[arg(long, value_enum)]
        workload: Workload,
        /// Hours of sleep per night, 0 to 10
        #[arg(long)]
        sleep_hours: i64,
        /// Focus from 1 (poor) to 5 (excellent)
        #[arg(long)]
        focus: i64,
        #[arg(long, value_enum, default_value = "none")]
        conflicts: Conflicts,
        #[arg(long, default_value = "")]
        comment: String,
        /// Store the comment as blank
        #[arg(long)]
        anonymize: bool,
        /// Confirm the data may be used for internal follow-up
        #[arg(long)]
        consent: bool,
    },
    /// Score a CSV of check-in submissions into a session log
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        anonymize: bool,
        /// Also export the scored session log as CSV
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a markdown report from the collected store
    Report {
        #[arg(long = "organization")]
        organizations: Vec<String>,
        #[arg(long = "role")]
        roles: Vec<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export collected check-ins as CSV
    Export {
        #[arg(long = "organization")]
        organizations: Vec<String>,
        #[arg(long = "role")]
        roles: Vec<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value = "export_hr.csv")]
        out: PathBuf,
    },
    /// Print ready-to-use comment suggestions
    Suggest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let Cli {
        json,
        table,
        command,
    } = Cli::parse();

    match command {
        Commands::InitDb => {
            let pool = connect_pool().await?;
            store::init_db(&pool, &table).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect_pool().await?;
            store::seed(&pool, &table).await?;
            println!("Seed data inserted.");
        }
        Commands::CheckIn {
            organization,
            role,
            mood,
            workload,
            sleep_hours,
            focus,
            conflicts,
            comment,
            anonymize,
            consent,
        } => {
            if !consent {
                anyhow::bail!(
                    "consent is required: pass --consent to confirm the data may be used"
                );
            }

            let input = CheckInInput {
                organization,
                role,
                mood,
                workload,
                sleep_hours,
                focus,
                conflicts,
                comment,
            };
            let mut log = session::SessionLog::new();
            let (record, plan) =
                session::submit(&mut log, input, anonymize, Local::now().naive_local())?;

            if json {
                let payload = serde_json::json!({ "record": record, "plan": plan });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_check_in(&record, &plan);
            }
        }
        Commands::Batch { csv, anonymize, out } => {
            let inputs = export::read_inputs(&csv)?;
            let mut log = session::SessionLog::new();
            let submitted_at = Local::now().naive_local();

            for input in inputs {
                let (record, plan) = session::submit(&mut log, input, anonymize, submitted_at)?;
                println!(
                    "- {} ({}) risk {}/100 [{}]",
                    record.organization,
                    record.role,
                    record.risk.unwrap_or_default(),
                    plan.band.label()
                );
            }
            println!("Scored {} check-ins this session.", log.len());
            if let Some(mean_risk) = filter::mean(log.records(), |r| r.risk) {
                println!("Mean risk {mean_risk:.1}/100.");
            }

            if let Some(out) = out {
                std::fs::write(&out, export::to_csv_bytes(log.records())?)?;
                println!("Session log written to {}.", out.display());
            }
        }
        Commands::Report {
            organizations,
            roles,
            from,
            to,
            out,
        } => {
            let pool = connect_pool().await?;
            let source = store::PgSheetSource::new(pool);
            let records = store::load_records(&source, &table).await?;
            let criteria = build_criteria(organizations, roles, from, to);
            let filtered = filter::apply_filters(&records, &criteria);
            tracing::info!(
                total = records.len(),
                matched = filtered.len(),
                "loaded collected check-ins"
            );

            let rendered = report::build_report(&criteria, &filtered);
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            organizations,
            roles,
            from,
            to,
            out,
        } => {
            let pool = connect_pool().await?;
            let source = store::PgSheetSource::new(pool);
            let records = store::load_records(&source, &table).await?;
            let criteria = build_criteria(organizations, roles, from, to);
            let filtered = filter::apply_filters(&records, &criteria);

            std::fs::write(&out, export::to_csv_bytes(&filtered)?)?;
            println!("Exported {} check-ins to {}.", filtered.len(), out.display());
        }
        Commands::Suggest => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&suggest::SUGGESTION_GROUPS)?
                );
            } else {
                for group in suggest::SUGGESTION_GROUPS {
                    println!("{}:", group.category);
                    for phrase in group.phrases {
                        println!("- {phrase}");
                    }
                    println!();
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

async fn connect_pool() -> anyhow::Result<sqlx::PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to the collected store Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(|err| DashboardError::SourceUnavailable(err.to_string()))?;

    Ok(pool)
}

fn build_criteria(
    organizations: Vec<String>,
    roles: Vec<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> FilterCriteria {
    if from.is_some() != to.is_some() {
        tracing::warn!("date filter needs both --from and --to; ignoring the lone bound");
    }
    FilterCriteria {
        organizations: organizations.into_iter().collect::<HashSet<_>>(),
        roles: roles.into_iter().collect(),
        date_range: from.zip(to),
    }
}

fn print_check_in(record: &CheckInRecord, plan: &RecommendationPlan) {
    if let (Some(stress), Some(motivation), Some(risk)) =
        (record.stress, record.motivation, record.risk)
    {
        println!("Stress {stress}/100 | Motivation {motivation}/100 | Risk {risk}/100");
    }
    println!("{}", plan.summary);
    if record.keyword_flag == Some(true) {
        println!("Sensitive keywords detected in the comment. Prioritize a human conversation.");
    }

    println!();
    println!("Manager actions:");
    for action in &plan.manager_actions {
        println!("- {action}");
    }
    println!();
    println!("Peer actions:");
    for action in &plan.peer_actions {
        println!("- {action}");
    }
    println!();
    println!("{}", plan.disclaimer);
}

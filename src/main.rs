use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use campus_placement::config::AppConfig;
use campus_placement::error::AppError;
use campus_placement::telemetry;
use campus_placement::workflows::placement::{
    JsonFileStore, PlacementEngine, PlacementStore, PlacementSummary, YearLevelPolicy,
};
use campus_placement::workflows::roster::RosterImporter;

#[derive(Parser, Debug)]
#[command(
    name = "Campus Placement Desk",
    about = "Seed and inspect the internship placement pipeline from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import CSV rosters and write fresh snapshots to the data directory
    Seed(SeedArgs),
    /// Summarize the opportunity and application pipeline
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Student roster CSV
    #[arg(long)]
    students: PathBuf,
    /// Company representative roster CSV
    #[arg(long)]
    representatives: PathBuf,
    /// Career-center staff roster CSV
    #[arg(long)]
    staff: PathBuf,
    /// Opportunity book CSV
    #[arg(long)]
    opportunities: PathBuf,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Evaluation date for the report heading (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Seed(args) => run_seed(&config, args),
        Command::Report(args) => run_report(&config, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run_seed(config: &AppConfig, args: SeedArgs) -> Result<(), AppError> {
    let seed = RosterImporter::from_paths(
        &args.students,
        &args.representatives,
        &args.staff,
        &args.opportunities,
    )?;

    // Seeding starts a fresh dataset: rosters and listings come from the
    // CSVs, the application and withdrawal books start empty.
    let store = JsonFileStore::new(config.storage.data_dir.clone());
    store.save_users(&seed.users)?;
    store.save_opportunities(&seed.opportunities)?;
    store.save_applications(&[])?;
    store.save_withdrawals(&[])?;

    info!(
        users = seed.users.len(),
        opportunities = seed.opportunities.len(),
        "rosters imported"
    );
    println!(
        "Imported {} users and {} opportunities into {}",
        seed.users.len(),
        seed.opportunities.len(),
        config.storage.data_dir.display()
    );
    Ok(())
}

fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let store = Arc::new(JsonFileStore::new(config.storage.data_dir.clone()));
    let engine = PlacementEngine::new(store, Arc::new(YearLevelPolicy))?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    render_report(&engine.summary(), today);
    Ok(())
}

fn render_report(summary: &PlacementSummary, today: NaiveDate) {
    println!("Placement pipeline as of {today}");

    println!("\nOpportunities");
    if summary.opportunities.is_empty() {
        println!("- none on file");
    }
    for listing in &summary.opportunities {
        println!(
            "- {} | {} | {} | {}/{} slots | {}",
            listing.id,
            listing.title,
            listing.status,
            listing.confirmed_slots,
            listing.slots,
            if listing.visible { "visible" } else { "hidden" }
        );
    }

    println!("\nApplications");
    if summary.applications.is_empty() {
        println!("- none on file");
    }
    for application in &summary.applications {
        println!(
            "- {} | student {} | {} | {}{}",
            application.id,
            application.student,
            application.opportunity,
            application.status,
            if application.accepted { " (accepted)" } else { "" }
        );
    }

    let visible = summary
        .opportunities
        .iter()
        .filter(|listing| listing.visible)
        .count();
    let accepted = summary
        .applications
        .iter()
        .filter(|application| application.accepted)
        .count();
    println!(
        "\nTotals: {} opportunities ({} visible), {} applications ({} accepted)",
        summary.opportunities.len(),
        visible,
        summary.applications.len(),
        accepted
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_and_rejects_noise() {
        assert_eq!(
            parse_date(" 2025-06-15 ").expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
        );
        assert!(parse_date("15/06/2025").is_err());
    }
}

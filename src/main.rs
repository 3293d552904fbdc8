use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use survey_analytics::config::{
    DEFAULT_MEMBERS_FILE, DEFAULT_PARTICIPATION_FILE, DEFAULT_SURVEYS_FILE,
};
use survey_analytics::{loader, queries, report, DataSources, SurveyStore};

#[derive(Parser)]
#[command(name = "survey-analytics")]
#[command(about = "Member, survey and participation analytics over CSV exports", long_about = None)]
struct Cli {
    #[arg(long, env = "SURVEY_MEMBERS_FILE", default_value = DEFAULT_MEMBERS_FILE)]
    members: PathBuf,
    #[arg(long, env = "SURVEY_SURVEYS_FILE", default_value = DEFAULT_SURVEYS_FILE)]
    surveys: PathBuf,
    #[arg(long, env = "SURVEY_PARTICIPATION_FILE", default_value = DEFAULT_PARTICIPATION_FILE)]
    participations: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Surveys a member completed
    CompletedSurveys {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        member_id: u64,
    },
    /// Points a member earned per eligible participation
    Points {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        member_id: u64,
    },
    /// Members who completed a survey
    CompletedRespondents {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        survey_id: u64,
    },
    /// Active members with no participation in a survey
    InvitableMembers {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        survey_id: u64,
    },
    /// Completion statistics for every survey
    Statistics,
    /// Row counts from the data load
    Summary,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let sources = DataSources::new(cli.members, cli.surveys, cli.participations);
    let store = loader::load(&sources).context("failed to load survey data")?;

    run(cli.command, &store)
}

fn run(command: Commands, store: &SurveyStore) -> anyhow::Result<()> {
    match command {
        Commands::CompletedSurveys { member_id } => {
            print_json(&queries::completed_surveys(store, member_id))?;
        }
        Commands::Points { member_id } => {
            let points = queries::member_points(store, member_id)
                .with_context(|| format!("failed to compute points for member {member_id}"))?;
            print_json(&points)?;
        }
        Commands::CompletedRespondents { survey_id } => {
            print_json(&queries::completed_respondents(store, survey_id))?;
        }
        Commands::InvitableMembers { survey_id } => {
            print_json(&queries::invitable_members(store, survey_id))?;
        }
        Commands::Statistics => {
            print_json(&queries::survey_statistics(store))?;
        }
        Commands::Summary => {
            print_json(store.report())?;
        }
        Commands::Report { out } => {
            std::fs::write(&out, report::build_report(store))
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use section1983::analysis::{classify_location, classify_violation};
use section1983::app_config::{self, Config};
use section1983::billing::suggested_referral_codes;
use section1983::court::{
    all_districts_for_state, lookup_court_by_location, validate_manual_court_entry, CourtLookupResponse,
};
use section1983::errors::AppError;
use section1983::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and load the template catalog
    Init,

    /// Classify an incident description and location
    Classify {
        /// Free-text account of what happened
        #[arg(short, long)]
        description: String,

        /// Where it happened
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Find the federal district court for a location
    Court {
        #[arg(long)]
        city: String,

        /// State name or postal abbreviation
        #[arg(long)]
        state: String,

        #[arg(long)]
        county: Option<String>,
    },

    /// List the districts and divisions of a state
    Districts {
        /// State name or postal abbreviation
        state: String,
    },

    /// Check a court caption typed in by hand
    ValidateCourt {
        text: String,
    },

    /// Import a document (with its owner) from a JSON file
    AddDocument {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate all sections of a document from templates
    Generate {
        document_id: i64,

        /// Rewrite eligible sections with AI when the budget allows
        #[arg(long)]
        ai: bool,
    },

    /// Show the classification and completeness of a document
    Analyze {
        document_id: i64,
    },

    /// Render matching templates without storing them
    Preview {
        document_id: i64,
    },

    /// List the sections of a document
    Sections {
        document_id: i64,
    },

    /// Regenerate one section from its template
    UpdateSection {
        document_id: i64,
        section_type: String,
    },

    /// Write boilerplate for the seven standard sections
    DefaultSections {
        document_id: i64,
    },

    /// Price a plan with a discount code
    Discount {
        code: String,

        /// pay_per_doc or unlimited
        plan: String,

        /// Count a use of the code
        #[arg(long)]
        redeem: bool,
    },

    /// Manage referral codes
    Referral {
        #[command(subcommand)]
        action: ReferralAction,
    },

    /// Build the Statement of Facts from reviewed video evidence
    Facts {
        document_id: i64,
    },

    /// Transcribe a YouTube video or part of one
    Transcript {
        url: String,

        /// Start time (SS, MM:SS or HH:MM:SS)
        #[arg(long)]
        start: Option<String>,

        /// End time (SS, MM:SS or HH:MM:SS)
        #[arg(long)]
        end: Option<String>,
    },

    /// Verify the OpenAI key and endpoint
    CheckAi,

    /// Generate shell completions for section1983
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ReferralAction {
    /// Create a referral code for a user
    Create { user_id: i64, code: String },
    /// Suggest codes for a user
    Suggest { user_id: i64 },
    /// Pause or resume a code
    Toggle { user_id: i64, code_id: i64 },
    /// Show a user's codes and their usage
    List { user_id: i64 },
}

/// section1983 - Civil rights complaint drafting engine
///
/// Classifies an incident, matches legal templates and writes the sections
/// of a 42 U.S.C. § 1983 complaint, optionally polished by AI.
#[derive(Parser, Debug)]
#[command(name = "section1983")]
#[command(version)]
#[command(about = "Draft federal civil rights complaints from templates")]
#[command(long_about = "section1983 classifies a police encounter, matches pre-written legal templates and \
writes the sections of a federal civil rights complaint.

EXAMPLES:
    section1983 init                                   # Create the database and templates
    section1983 add-document incident.json             # Import a document
    section1983 generate 1                             # Generate sections from templates
    section1983 generate 1 --ai                        # Let AI rewrite eligible sections
    section1983 court --city Pittsburgh --state PA     # Find the federal court
    section1983 discount LAUNCH25 unlimited            # Price a plan with a code
    section1983 completions bash > section1983.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. The OpenAI key may also come from OPENAI_API_KEY.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Soft failures are printed, everything else aborts
fn print_soft_error(error: AppError) -> Result<()> {
    match error {
        AppError::Discount(e) => print_json(&serde_json::json!({ "valid": false, "error": e.to_string() })),
        AppError::Referral(e) => print_json(&serde_json::json!({ "success": false, "error": e.to_string() })),
        AppError::Transcript(e) => print_json(&serde_json::json!({ "success": false, "error": e.to_string() })),
        other => Err(other.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(LevelFilter::from(&level));
    }

    // Commands that need neither config nor database
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "section1983", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Classify { description, location } => {
            let violation = classify_violation(Some(description.as_str()));
            let forum = classify_location(location.as_deref());
            return print_json(&serde_json::json!({
                "violation_type": violation,
                "violation_description": violation.description(),
                "location_type": forum,
                "location_description": forum.description(),
            }));
        }
        Commands::Court { city, state, county } => {
            let response = CourtLookupResponse::from(lookup_court_by_location(city, state, county.as_deref()));
            return print_json(&response);
        }
        Commands::Districts { state } => {
            return match all_districts_for_state(state) {
                Ok(districts) => print_json(&districts),
                Err(e) => print_json(&serde_json::json!({ "success": false, "error": e.to_string() })),
            };
        }
        Commands::ValidateCourt { text } => {
            return match validate_manual_court_entry(text) {
                Ok(court) => print_json(&serde_json::json!({ "valid": true, "court": court })),
                Err(e) => print_json(&serde_json::json!({ "valid": false, "error": e.to_string() })),
            };
        }
        _ => {}
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level.into();
    } else {
        log::set_max_level(LevelFilter::from(&config.log_level));
    }
    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    debug!("Controller ready");

    run_command(cli.command, &controller).await
}

async fn run_command(command: Commands, controller: &Controller) -> Result<()> {
    match command {
        Commands::Init => {
            let templates = controller.initialize().await?;
            let database = controller.repository().connection().stats()?;
            info!("Database ready: {}", database);
            print_json(&serde_json::json!({ "templates": templates, "database": database }))
        }
        Commands::AddDocument { file } => {
            let imported = controller.import_document_file(&file).await?;
            info!("Document {} ready", imported.document_id);
            print_json(&imported)
        }
        Commands::Generate { document_id, ai } => {
            let report = controller.orchestrator().auto_populate_document(document_id, ai).await?;
            print_json(&report)
        }
        Commands::Analyze { document_id } => {
            let analysis = controller.orchestrator().document_analysis(document_id).await?;
            print_json(&analysis)
        }
        Commands::Preview { document_id } => {
            let previews = controller.orchestrator().preview_sections(document_id).await?;
            print_json(&previews)
        }
        Commands::Sections { document_id } => {
            let sections = controller.sections();
            let stats = sections.section_statistics(document_id).await?;
            let list = sections.document_sections(document_id).await?;
            print_json(&serde_json::json!({ "statistics": stats, "sections": list }))
        }
        Commands::UpdateSection { document_id, section_type } => {
            let report = controller
                .orchestrator()
                .update_specific_section(document_id, &section_type)
                .await?;
            print_json(&report)
        }
        Commands::DefaultSections { document_id } => {
            let report = controller.create_default_sections(document_id).await?;
            print_json(&report)
        }
        Commands::Discount { code, plan, redeem } => {
            let discounts = controller.discounts();
            let result = if redeem {
                discounts.redeem_discount_code(&code, &plan).await
            } else {
                discounts.validate_discount_code(&code, &plan).await
            };
            match result {
                Ok(quote) => print_json(&quote),
                Err(e) => print_soft_error(e),
            }
        }
        Commands::Referral { action } => run_referral(action, controller).await,
        Commands::CheckAi => match controller.check_ai_connection().await {
            Ok(true) => print_json(&serde_json::json!({ "connected": true })),
            Ok(false) => print_json(&serde_json::json!({
                "connected": false,
                "error": "OpenAI API key not configured",
            })),
            Err(e) => print_json(&serde_json::json!({ "connected": false, "error": e.to_string() })),
        },
        Commands::Facts { document_id } => {
            let section = controller.evidence().generate_facts_section(document_id).await?;
            match &section.metadata.error {
                Some(error) => println!("{}", error),
                None => {
                    println!("{}", section.content);
                    println!();
                    println!("{}", section.exhibits_list);
                }
            }
            Ok(())
        }
        Commands::Transcript { url, start, end } => {
            match controller
                .transcripts()
                .get_transcript(&url, start.as_deref(), end.as_deref())
                .await
            {
                Ok(transcript) => print_json(&transcript),
                Err(e) => print_soft_error(e.into()),
            }
        }
        Commands::Completions { .. }
        | Commands::Classify { .. }
        | Commands::Court { .. }
        | Commands::Districts { .. }
        | Commands::ValidateCourt { .. } => Ok(()),
    }
}

async fn run_referral(action: ReferralAction, controller: &Controller) -> Result<()> {
    let referrals = controller.referrals();
    match action {
        ReferralAction::Create { user_id, code } => match referrals.create_referral_code(user_id, &code).await {
            Ok(record) => print_json(&record),
            Err(e) => print_soft_error(e),
        },
        ReferralAction::Suggest { user_id } => {
            let user = controller
                .repository()
                .get_user(user_id)
                .await?
                .with_context(|| format!("User {} not found", user_id))?;
            print_json(&suggested_referral_codes(&user))
        }
        ReferralAction::Toggle { user_id, code_id } => match referrals.toggle_referral_code(user_id, code_id).await {
            Ok(active) => print_json(&serde_json::json!({ "success": true, "is_active": active })),
            Err(e) => print_soft_error(e),
        },
        ReferralAction::List { user_id } => {
            let stats = referrals.referral_code_stats(user_id).await?;
            print_json(&stats)
        }
    }
}

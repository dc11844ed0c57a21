use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use mortgage_advisor::config::{AppConfig, MortgageConfig};
use mortgage_advisor::error::AppError;
use mortgage_advisor::telemetry::{self, LogOutput};
use mortgage_advisor::workflows::mortgage::{
    advisor_router, ApplicantProfile, AssessmentRequest, BankOutcome, CatalogError,
    ConstraintCatalog, CsvCatalogStore, CsvHistoryLog, EligibilityReport, EvaluationConfig,
    HistoryEntry, MortgageAdvisorService,
};
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Mortgage Advisor",
    about = "Compare an applicant profile against bank lending constraints",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the bank constraint catalog
    Banks(CatalogArgs),
    /// Write the reference bank constraints to the catalog file
    SeedCatalog(CatalogArgs),
    /// Evaluate one applicant profile against every bank
    Evaluate(EvaluateArgs),
    /// Print the most recently recorded applicant profiles
    History(HistoryArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Override the configured bank constraint CSV
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Requested loan amount
    #[arg(long)]
    loan_amount: f64,
    /// Gross annual income
    #[arg(long)]
    annual_income: f64,
    /// Capital available for the down payment
    #[arg(long)]
    capital: f64,
    /// Credit score (300-850)
    #[arg(long)]
    credit_score: u16,
    /// Offer the bank's maximum loan when the requested amount is declined
    #[arg(long)]
    alternatives: bool,
    /// Evaluate without appending the profile to the history log
    #[arg(long)]
    no_history: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Number of rows to print
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Banks(args) => run_banks(args),
        Command::SeedCatalog(args) => run_seed_catalog(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::History(args) => run_history(args),
    }
}

/// Loads configuration and installs logging on stderr for one-shot commands.
fn command_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogOutput::Stderr)?;
    Ok(config)
}

fn load_catalog(config: &MortgageConfig) -> Result<ConstraintCatalog, CatalogError> {
    let store = CsvCatalogStore::new(&config.catalog_path);
    if config.seed_catalog {
        store.load_or_seed(&ConstraintCatalog::reference())
    } else {
        store.load()
    }
}

fn build_service(
    config: &MortgageConfig,
) -> Result<MortgageAdvisorService<CsvHistoryLog>, AppError> {
    let catalog = load_catalog(config)?;
    let history = Arc::new(CsvHistoryLog::new(&config.history_path));
    let evaluation = EvaluationConfig::default().with_alternatives(config.offer_alternatives);
    Ok(MortgageAdvisorService::new(catalog, history, evaluation))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, LogOutput::Stdout)?;

    let service = Arc::new(build_service(&config.mortgage)?);
    let banks = service.catalog().len();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(advisor_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, banks, "mortgage advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_banks(args: CatalogArgs) -> Result<(), AppError> {
    let mut config = command_config()?;
    if let Some(path) = args.catalog {
        config.mortgage.catalog_path = path;
    }

    let catalog = load_catalog(&config.mortgage)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

fn run_seed_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = command_config()?;
    let path = args.catalog.unwrap_or(config.mortgage.catalog_path);

    let catalog = ConstraintCatalog::reference();
    CsvCatalogStore::new(&path).save(&catalog)?;
    println!(
        "Wrote {} bank constraint(s) to {}",
        catalog.len(),
        path.display()
    );
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        loan_amount,
        annual_income,
        capital,
        credit_score,
        alternatives,
        no_history,
        json,
    } = args;

    let config = command_config()?;
    let service = build_service(&config.mortgage)?;

    let request = AssessmentRequest {
        profile: ApplicantProfile {
            loan_amount,
            annual_income,
            capital,
            credit_score,
        },
        offer_alternatives: alternatives.then_some(true),
    };

    let report = if no_history {
        service.preview(request)?
    } else {
        service.assess(request)?
    };

    if json {
        let body = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = command_config()?;
    let service = build_service(&config.mortgage)?;
    let entries = service.history(args.limit)?;
    print!("{}", render_history(&entries));
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_catalog(catalog: &ConstraintCatalog) -> String {
    let mut out = String::new();
    if catalog.is_empty() {
        out.push_str("No bank constraints configured\n");
        return out;
    }

    let _ = writeln!(out, "Bank constraints");
    for bank in catalog {
        let _ = writeln!(
            out,
            "- {}: rate {:.2}%, max {:.1}x income, min credit score {}, down payment {:.1}%",
            bank.name,
            bank.base_interest_rate,
            bank.max_loan_to_income,
            bank.min_credit_score,
            bank.down_payment_fraction * 100.0
        );
    }
    out
}

fn render_report(report: &EligibilityReport) -> String {
    let mut out = String::new();
    let profile = &report.profile;

    let _ = writeln!(out, "Mortgage eligibility report");
    let _ = writeln!(
        out,
        "Requested {:.2} with income {:.2}, capital {:.2}, credit score {}",
        profile.loan_amount, profile.annual_income, profile.capital, profile.credit_score
    );
    let _ = writeln!(out, "Summary: {}", report.summary());

    for decision in &report.decisions {
        let _ = writeln!(
            out,
            "\n{} ({:.2}% interest)",
            decision.bank.name, decision.bank.base_interest_rate
        );

        match &decision.outcome {
            BankOutcome::Eligible { .. } => {
                let _ = writeln!(
                    out,
                    "  Eligible. Max loan {:.2}, down payment {:.2}",
                    decision.max_loan_allowed, decision.required_down_payment
                );
            }
            BankOutcome::AlternativeOffer {
                offered_amount,
                offered_down_payment,
                ..
            } => {
                let _ = writeln!(
                    out,
                    "  Not eligible as requested. Alternative offer {:.2} with down payment {:.2}",
                    offered_amount, offered_down_payment
                );
            }
            BankOutcome::Ineligible { .. } => {
                let _ = writeln!(out, "  Not eligible");
            }
        }

        for reason in decision.reasons() {
            let _ = writeln!(
                out,
                "  - {}: {} (short by {:.2})",
                reason.label(),
                reason.summary(),
                reason.shortfall()
            );
        }

        for option in decision.loan_options() {
            let _ = writeln!(
                out,
                "  {} years: {:.2} per month ({})",
                option.term_years,
                option.monthly_payment,
                if option.sustainable {
                    "sustainable"
                } else {
                    "not sustainable"
                }
            );
        }
    }
    out
}

fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recorded requests\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} | loan {:.2} | income {:.2} | capital {:.2} | credit score {}",
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            entry.loan_amount,
            entry.annual_income,
            entry.capital,
            entry.credit_score
        );
    }
    out
}

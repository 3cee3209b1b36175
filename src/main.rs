use std::error::Error;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, Level};

use esg_carbon_assess::config::NarrativeConfig;
use esg_carbon_assess::form::Questionnaire;
use esg_carbon_assess::narrative::{narrate, GeminiClient};
use esg_carbon_assess::report::{render_chart, render_text, JsonReport};
use esg_carbon_assess::{
    assess, AssessError, AssessmentInput, Compliance, IndustryType, WorkerSafety,
};

#[derive(Debug, Parser)]
#[command(name = "esg-assess", about = "Carbon footprint & ESG assessment for a facility")]
struct Cli {
    /// Read the facility inputs from a JSON file.
    #[arg(long, conflicts_with = "interactive")]
    input: Option<PathBuf>,

    /// Walk through the guided questionnaire.
    #[arg(long)]
    interactive: bool,

    #[arg(long)]
    industry: Option<IndustryType>,
    #[arg(long)]
    electricity_kwh: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    solar_kwh: f64,
    #[arg(long, default_value_t = 0.0)]
    diesel_litres: f64,
    #[arg(long, default_value_t = 0.0)]
    lpg_kg: f64,
    #[arg(long)]
    production_units: Option<f64>,
    #[arg(long)]
    worker_safety: Option<WorkerSafety>,
    #[arg(long)]
    compliance: Option<Compliance>,

    /// Print one JSON document (result, chart slices, narrative) instead of the text report.
    #[arg(long)]
    json: bool,

    /// Request the AI sustainability analysis (needs GEMINI_API_KEY).
    #[arg(long)]
    narrative: bool,

    /// -v for info, -vv for debug logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn input_from_flags(&self) -> Result<AssessmentInput, Box<dyn Error>> {
        fn required<T: Copy>(v: Option<T>, flag: &str) -> Result<T, Box<dyn Error>> {
            v.ok_or_else(|| format!("missing --{flag} (or use --input / --interactive)").into())
        }
        Ok(AssessmentInput {
            industry_type: self.industry.unwrap_or(IndustryType::Other),
            electricity_kwh: required(self.electricity_kwh, "electricity-kwh")?,
            solar_kwh: self.solar_kwh,
            diesel_litres: self.diesel_litres,
            lpg_kg: self.lpg_kg,
            production_units: required(self.production_units, "production-units")?,
            worker_safety: required(self.worker_safety, "worker-safety")?,
            compliance: required(self.compliance, "compliance")?,
        })
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn gather_input(cli: &Cli) -> Result<Option<AssessmentInput>, Box<dyn Error>> {
    if let Some(path) = &cli.input {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let input: AssessmentInput = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid input file {}: {e}", path.display()))?;
        return Ok(Some(input));
    }
    if cli.interactive {
        let stdin = io::stdin();
        let mut form = Questionnaire::new(stdin.lock(), io::stdout());
        return Ok(form.collect()?);
    }
    cli.input_from_flags().map(Some)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let Some(input) = gather_input(cli)? else {
        info!("assessment not started");
        return Ok(());
    };

    let result = assess(&input)?;

    let narrative = cli.narrative.then(|| {
        NarrativeConfig::from_env()
            .map_err(Into::into)
            .and_then(GeminiClient::new)
            .map(|client| narrate(&client, input.industry_type, &result).message().to_string())
            .unwrap_or_else(|e| format!("AI Error: {e}"))
    });

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&JsonReport::new(&result, narrative))?);
        return Ok(());
    }

    print!("{}", render_text(&result));
    println!();
    print!("{}", render_chart(&result));
    if let Some(text) = narrative {
        println!();
        println!("AI Sustainability Analysis");
        println!("{text}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AssessError>() {
                Some(AssessError::Validation(msg)) => eprintln!("{msg}"),
                _ => eprintln!("error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

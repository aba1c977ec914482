mod reports;
mod scenario;
mod transport;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use gamestore_core::Credentials;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use reports::ScenarioResult;
use scenario::{Accounts, Backend, ScenarioCtx, expand_scenarios, get_scenario, list_scenarios};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// In-memory backend, seeded fresh for every scenario (fast, no network)
    Contract,
    /// A running backend at --base-url
    Live,
}

impl TestMode {
    const fn label(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Live => "live",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gamestore-tester", version = "0.1.0")]
#[command(about = "Contract and smoke testing for the game store backend")]
struct Args {
    /// Test mode: contract (in-memory backend) or live (HTTP)
    #[arg(long, value_enum, default_value_t = TestMode::Contract)]
    mode: TestMode,

    /// API base URL (live mode only)
    #[arg(long, default_value = "http://localhost:5000/api")]
    base_url: String,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Shopper account email
    #[arg(long, default_value = "shopper@example.com")]
    email: String,

    /// Shopper account password
    #[arg(long, default_value = "password")]
    password: String,

    /// Admin account email
    #[arg(long, default_value = "admin@example.com")]
    admin_email: String,

    /// Admin account password
    #[arg(long, default_value = "admin")]
    admin_password: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn backend(&self) -> Backend {
        match self.mode {
            TestMode::Contract => Backend::Fake,
            TestMode::Live => Backend::Live {
                base_url: self.base_url.clone(),
            },
        }
    }

    fn accounts(&self) -> Accounts {
        Accounts {
            shopper: Credentials {
                email: self.email.clone(),
                password: self.password.clone(),
            },
            admin: Credentials {
                email: self.admin_email.clone(),
                password: self.admin_password.clone(),
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner(&args);

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let results = run_scenarios(&args, &scenarios).await;

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner(args: &Args) {
    println!("{}", "🎮 Game Store Contract Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
    match args.mode {
        TestMode::Contract => println!("Backend: in-memory"),
        TestMode::Live => println!("Backend: {}", args.base_url.bold()),
    }
}

async fn run_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let backend = args.backend();
    let accounts = args.accounts();
    let mode = args.mode.label();
    let mut results = Vec::with_capacity(scenarios.len());

    println!("{}", "🧪 Running Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    for name in scenarios {
        let Some(scenario) = get_scenario(name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            let outcome = Err(anyhow::anyhow!("unknown scenario"));
            results.push(ScenarioResult::new(name, "", mode, &outcome, Default::default()));
            continue;
        };

        let scenario_start = Instant::now();
        let outcome = match ScenarioCtx::connect(&backend, &accounts, args.verbose) {
            Ok(ctx) => scenario.run(&ctx).await,
            Err(err) => Err(err),
        };
        let duration = scenario_start.elapsed();
        match &outcome {
            Ok(()) => println!("✅ [{mode}] {} - {duration:?}", name.green()),
            Err(err) => eprintln!("❌ [{mode}] {} - {duration:?}: {err:#}", name.red()),
        }
        results.push(ScenarioResult::new(
            name,
            scenario.description(),
            mode,
            &outcome,
            duration,
        ));
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Game Store Contract Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_seeded_in_memory_backend() {
        let args = Args::parse_from(["gamestore-tester"]);
        assert_eq!(args.mode, TestMode::Contract);
        assert_eq!(args.backend(), Backend::Fake);
        let accounts = args.accounts();
        assert_eq!(accounts.shopper.email, "shopper@example.com");
        assert_eq!(accounts.admin.password, "admin");
        assert_eq!(expand_scenarios(&args.scenarios).len(), list_scenarios().len());
    }

    #[test]
    fn live_mode_carries_the_base_url() {
        let args = Args::parse_from([
            "gamestore-tester",
            "--mode",
            "live",
            "--base-url",
            "https://shop.example.com/api",
        ]);
        assert_eq!(
            args.backend(),
            Backend::Live {
                base_url: String::from("https://shop.example.com/api")
            }
        );
    }

    #[test]
    fn unknown_report_formats_are_rejected() {
        assert!(Args::try_parse_from(["gamestore-tester", "--report", "csv"]).is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn every_scenario_passes_against_the_in_memory_backend() {
        let args = Args::parse_from(["gamestore-tester"]);
        let results = run_scenarios(&args, &expand_scenarios("all")).await;
        for result in &results {
            assert!(result.passed, "{} failed: {:?}", result.scenario_name, result.failures);
        }
        assert_eq!(results.len(), 5);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unknown_scenarios_are_reported_as_failures() {
        let args = Args::parse_from(["gamestore-tester"]);
        let results = run_scenarios(&args, &[String::from("nope")]).await;
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = std::env::temp_dir().join(format!(
            "gamestore-output-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}

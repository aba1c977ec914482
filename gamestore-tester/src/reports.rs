use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub description: String,
    /// `contract` or `live`.
    pub mode: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    pub finished_at: DateTime<Utc>,
}

impl ScenarioResult {
    #[must_use]
    pub fn new(
        scenario_name: &str,
        description: &str,
        mode: &str,
        outcome: &Result<()>,
        duration: Duration,
    ) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            description: description.to_string(),
            mode: mode.to_string(),
            passed: outcome.is_ok(),
            failures: outcome
                .as_ref()
                .err()
                .map(|err| vec![format!("{err:#}")])
                .unwrap_or_default(),
            duration,
            finished_at: Utc::now(),
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

struct Tally {
    total: usize,
    passed: usize,
    failed: usize,
    success_rate: f64,
}

fn tally(results: &[ScenarioResult]) -> Tally {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let success_rate = if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    };
    Tally {
        total,
        passed,
        failed: total - passed,
        success_rate,
    }
}

/// # Errors
/// Returns any write failure.
pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Contract Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "================================".cyan())?;

    let tally = tally(results);
    writeln!(out, "Total scenarios: {}", tally.total)?;
    writeln!(out, "Passed: {}", tally.passed.to_string().green())?;
    writeln!(out, "Failed: {}", tally.failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", tally.success_rate)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {} ({})", status, result.scenario_name.bold(), result.mode)?;
        writeln!(out, "   {}", result.description)?;
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    if let (Some(fastest), Some(slowest)) = (
        results.iter().min_by_key(|r| r.duration),
        results.iter().max_by_key(|r| r.duration),
    ) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(out, "Fastest: {} ({:?})", fastest.scenario_name.green(), fastest.duration)?;
        writeln!(out, "Slowest: {} ({:?})", slowest.scenario_name.yellow(), slowest.duration)?;
    }
    Ok(())
}

/// # Errors
/// Returns serialization or write failures.
pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

/// # Errors
/// Returns any write failure.
pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Game Store Contract Test Results\n")?;

    let tally = tally(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", tally.total)?;
    writeln!(out, "- **Passed**: {}", tally.passed)?;
    writeln!(out, "- **Failed**: {}", tally.failed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", tally.success_rate)?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {}\n", result.scenario_name)?;
        writeln!(out, "- **Checks**: {}", result.description)?;
        writeln!(out, "- **Mode**: {}", result.mode)?;
        writeln!(out, "- **Time**: {:?}", result.duration)?;
        writeln!(out, "- **Finished**: {}", result.finished_at.to_rfc3339())?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

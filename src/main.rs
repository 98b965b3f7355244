mod cli;

use clap::Parser;
use funalytics::error::{FunalyticsError, Result};
use funalytics::report::{self, OutputFormat};
use funalytics::scoring;
use funalytics::types::audience::Audience;
use funalytics::types::scoring::ScoreBatch;
use funalytics::{catalog, config, telemetry};
use serde_json::json;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn require_audience(name: &str) -> Result<Audience> {
    Audience::parse(name).ok_or_else(|| FunalyticsError::UnknownAudience(name.to_string()))
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet)?;

    let (policy, sources) = config::load_policy(&cli.policy_root)?;
    if sources.is_builtin() {
        tracing::info!(version = %policy.policy.version, "using built-in policy");
    } else {
        tracing::info!(
            version = %policy.policy.version,
            layers = sources.files.len(),
            "loaded policy"
        );
    }

    match cli.command {
        cli::Commands::Score(cmd) => {
            let only = cmd.audience.as_deref().map(require_audience).transpose()?;
            let events = catalog::load_events(&cmd.path)?;

            let reports = events
                .iter()
                .map(|event| {
                    let mut report = scoring::score_all_audiences(&policy, event);
                    if let Some(audience) = only {
                        report.scores.retain(|result| result.audience == audience.name());
                    }
                    report
                })
                .collect::<Vec<_>>();
            let excluded = reports
                .iter()
                .filter(|report| report.exclusion.is_excluded)
                .count();

            let batch = ScoreBatch::new(&policy, reports)?;
            println!("{}", report::render_scores(&batch, output_format(&cmd.format))?);

            if excluded > 0 {
                eprintln!("warning: {excluded} event(s) excluded by listing rules");
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Rank(cmd) => {
            let audience = require_audience(&cmd.audience)?;
            let events = catalog::load_events(&cmd.path)?;

            let mut ranked = scoring::rank_events(&policy, &events, audience.name());
            if let Some(limit) = cmd.limit {
                ranked.truncate(limit);
            }

            let batch = ScoreBatch::new(&policy, ranked)?;
            println!(
                "{}",
                report::render_ranking(&batch, audience.name(), output_format(&cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Audiences(cmd) => {
            let events = catalog::load_events(&cmd.path)?;
            for event in &events {
                let verdict = scoring::validate_event_exclusions(
                    &event.category,
                    &event.description,
                    &policy.exclusions,
                );
                if verdict.is_excluded {
                    println!(
                        "{}: excluded ({})",
                        event.label(),
                        verdict.rule_id.as_deref().unwrap_or("unknown")
                    );
                    continue;
                }
                let audiences = scoring::get_audience_recommendations(&policy, event)
                    .iter()
                    .map(|audience| audience.name())
                    .collect::<Vec<_>>();
                println!("{}: {}", event.label(), audiences.join(", "));
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Policy(cmd) => {
            let layers = sources
                .files
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>();
            let mut summary = json!({
                "version": policy.policy.version,
                "fingerprint": policy.fingerprint()?,
                "layers": layers,
            });
            if !cmd.validate_only {
                summary["policy"] = serde_json::to_value(&policy)?;
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

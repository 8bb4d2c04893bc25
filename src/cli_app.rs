//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use legacymod::assessment::navigation::{NavigationState, Scenario, sidebar};
use legacymod::assessment::overview::summary_for;
use legacymod::assessment::shell::{Interaction, Shell, ViewModel};
use legacymod::core::config::Config;
use legacymod::core::errors::LmError;
use legacymod::tui::{DashboardRuntimeConfig, render_view_to_string, run_dashboard};

/// Default `view` width when stdout is not a terminal.
const DEFAULT_VIEW_WIDTH: u16 = 100;
/// Narrowest `view` rendering accepted.
const MIN_VIEW_WIDTH: u16 = 40;

/// LegacyMod: modernization assessment dashboard.
#[derive(Debug, Parser)]
#[command(
    name = "legacymod",
    author,
    version,
    about = "LegacyMod - Modernization Assessment Dashboard",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Interactive terminal dashboard.
    Dashboard(DashboardArgs),
    /// Print the text rendering of one view.
    View(ViewArgs),
    /// Print computed view-model summaries.
    Metrics(MetricsArgs),
    /// List navigable scenarios.
    Scenarios,
    /// Inspect configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
    /// Show version and optional build metadata.
    Version(VersionArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct DashboardArgs {
    /// Scenario to open on (overrides `ui.start_scenario`).
    #[arg(long, value_name = "SCENARIO", value_parser = parse_scenario)]
    start: Option<Scenario>,
}

#[derive(Debug, Clone, Args)]
struct ViewArgs {
    /// Scenario id (overview, integration, time, behavior, scale, dashboard) or 1-6.
    #[arg(value_parser = parse_scenario)]
    scenario: Scenario,
    /// Risk threshold for the integration view.
    #[arg(long, value_name = "PERCENT")]
    threshold: Option<i32>,
    /// Render width in columns (defaults to the terminal width).
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,
}

#[derive(Debug, Clone, Args, Default)]
struct MetricsArgs {
    /// Limit output to one scenario.
    #[arg(value_parser = parse_scenario)]
    scenario: Option<Scenario>,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum ConfigCommand {
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
    /// Load and validate the configuration.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Args, Default)]
struct VersionArgs {
    /// Include additional build metadata fields.
    #[arg(long)]
    verbose: bool,
}

fn parse_scenario(raw: &str) -> Result<Scenario, String> {
    if let Ok(n) = raw.trim().parse::<u8>() {
        return Scenario::from_number(n).ok_or_else(|| format!("no scenario numbered {n} (1-6)"));
    }
    Scenario::parse(raw).ok_or_else(|| {
        let ids: Vec<&str> = Scenario::ALL.iter().map(|s| s.id()).collect();
        format!("unknown scenario '{raw}' (expected one of: {})", ids.join(", "))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input or configuration.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<LmError> for CliError {
    fn from(err: LmError) -> Self {
        match err {
            LmError::InvalidConfig { .. }
            | LmError::MissingConfig { .. }
            | LmError::ConfigParse { .. } => Self::User(err.to_string()),
            LmError::Serialization { .. } => Self::Internal(err.to_string()),
            LmError::Io { .. } | LmError::Terminal { .. } | LmError::Runtime { .. } => {
                Self::Runtime(err.to_string())
            }
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    }

    match &cli.command {
        Command::Dashboard(args) => run_dashboard_command(cli, args),
        Command::View(args) => run_view(cli, args),
        Command::Metrics(args) => run_metrics(cli, args),
        Command::Scenarios => run_scenarios(cli),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
        Command::Version(args) => emit_version(cli, args),
    }
}

fn run_dashboard_command(cli: &Cli, args: &DashboardArgs) -> Result<(), CliError> {
    if !io::stdout().is_terminal() {
        return Err(CliError::User(
            "dashboard needs an interactive terminal; use `legacymod view` for text output"
                .to_string(),
        ));
    }
    let config = Config::load(cli.config.as_deref())?;
    let runtime = DashboardRuntimeConfig::from_config(&config, args.start, cli.no_color)?;
    run_dashboard(&runtime)?;
    Ok(())
}

fn run_view(cli: &Cli, args: &ViewArgs) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let mut shell = Shell::new(args.scenario, config.view_settings());

    if let Some(threshold) = args.threshold {
        if args.scenario != Scenario::Integration {
            return Err(CliError::User(
                "--threshold only applies to the integration view".to_string(),
            ));
        }
        let threshold = check_threshold(threshold, shell.settings().threshold_step)?;
        shell.apply(Interaction::SetThreshold(threshold));
    }

    let width = args.width.unwrap_or_else(default_view_width);
    if width < MIN_VIEW_WIDTH {
        return Err(CliError::User(format!(
            "--width must be at least {MIN_VIEW_WIDTH}, got {width}"
        )));
    }
    let text = render_view_to_string(&shell, usize::from(width));

    match output_mode(cli) {
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        OutputMode::Json => {
            write_json_line(&json!({
                "command": "view",
                "scenario": args.scenario,
                "width": width,
                "text": text,
            }))?;
        }
    }
    Ok(())
}

/// `--threshold` must land on the slider: within 0..=100 and on a step mark.
fn check_threshold(threshold: i32, step: u8) -> Result<i32, CliError> {
    if !(0..=100).contains(&threshold) {
        return Err(CliError::User(format!(
            "--threshold must be within 0..=100, got {threshold}"
        )));
    }
    if step > 0 && threshold % i32::from(step) != 0 {
        return Err(CliError::User(format!(
            "--threshold must be a multiple of the threshold step ({step}), got {threshold}"
        )));
    }
    Ok(threshold)
}

fn default_view_width() -> u16 {
    if io::stdout().is_terminal() {
        crossterm::terminal::size().map_or(DEFAULT_VIEW_WIDTH, |(cols, _)| cols.max(MIN_VIEW_WIDTH))
    } else {
        DEFAULT_VIEW_WIDTH
    }
}

fn run_metrics(cli: &Cli, args: &MetricsArgs) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let scenarios: Vec<Scenario> = args
        .scenario
        .map_or_else(|| Scenario::ALL.to_vec(), |s| vec![s]);
    let views: Vec<(Scenario, ViewModel)> = scenarios
        .into_iter()
        .map(|s| (s, Shell::new(s, config.view_settings()).view_model()))
        .collect();

    match output_mode(cli) {
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            for (i, (scenario, vm)) in views.iter().enumerate() {
                if i > 0 {
                    writeln!(stdout)?;
                }
                writeln!(stdout, "{}", scenario.label().bold())?;
                for (label, value) in metric_rows(vm) {
                    writeln!(stdout, "  {label:<24} {}", value.cyan())?;
                }
            }
        }
        OutputMode::Json => {
            let payload: Vec<Value> = views
                .iter()
                .map(|(scenario, vm)| {
                    serde_json::to_value(vm).map(|value| {
                        json!({
                            "scenario": scenario,
                            "view_model": value,
                        })
                    })
                })
                .collect::<Result<_, _>>()?;
            write_json_line(&json!({
                "command": "metrics",
                "views": payload,
            }))?;
        }
    }
    Ok(())
}

/// Headline numbers of a view model as label/value rows.
fn metric_rows(vm: &ViewModel) -> Vec<(String, String)> {
    let row = |label: &str, value: String| (label.to_string(), value);
    match vm {
        ViewModel::Overview(vm) => vm
            .cards
            .iter()
            .map(|card| {
                (
                    format!("S{} {}", card.number, card.scenario.label()),
                    format!(
                        "{} risk, impact {}",
                        card.risk_level.descriptor().label,
                        card.impact_score
                    ),
                )
            })
            .collect(),
        ViewModel::Integration(vm) => vec![
            row("Total dependencies", vm.summary.total.to_string()),
            row("Critical items", vm.summary.critical.to_string()),
            row("Avg impact score", vm.summary.avg_impact.to_string()),
            row("Assessed", vm.summary.assessed.to_string()),
            row("Risk threshold", format!("{}%", vm.threshold)),
            row("Flagged", vm.partition.flagged_count().to_string()),
        ],
        ViewModel::Time(vm) => vec![
            row("Avg legacy overhead", format!("{}%", vm.summary.avg_overhead_pct)),
            row("On-time delivery", format!("{}%", vm.summary.on_time_rate_pct)),
            row("At risk / delayed", vm.summary.late.to_string()),
            row("Active projects", vm.summary.total.to_string()),
            row(
                "Realistic estimate",
                format!(
                    "{} days (base {})",
                    vm.estimate.realistic_days, vm.estimate.base_days
                ),
            ),
        ],
        ViewModel::Behavior(vm) => vec![
            row("Detected bypasses", vm.summary.detected.to_string()),
            row("Critical risk", vm.summary.critical.to_string()),
            row("Users affected", vm.summary.users_affected.to_string()),
            row("Active issues", vm.summary.active.to_string()),
        ],
        ViewModel::Scale(vm) => vec![
            row("Legacy systems", vm.summary.legacy.to_string()),
            row("Hybrid systems", vm.summary.hybrid.to_string()),
            row("Modern systems", vm.summary.modern.to_string()),
            row("Avg health", format!("{}%", vm.summary.avg_health)),
            row(
                "Migration progress",
                format!("{}%", vm.summary.migration_progress_pct),
            ),
        ],
        ViewModel::Dashboard(vm) => std::iter::once(row("Overall risk", vm.overall_risk.to_string()))
            .chain(
                vm.scores
                    .iter()
                    .map(|s| row(&format!("{} score", s.name), s.score.to_string())),
            )
            .collect(),
    }
}

fn run_scenarios(cli: &Cli) -> Result<(), CliError> {
    let entries = sidebar(&NavigationState::default());
    match output_mode(cli) {
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            for entry in &entries {
                let card = summary_for(entry.scenario).map_or_else(String::new, |card| {
                    format!(
                        "{} risk, impact {}",
                        card.risk_level.descriptor().label,
                        card.impact_score
                    )
                });
                writeln!(
                    stdout,
                    "{}  {:<12} {:<22} {:<3} {}",
                    entry.scenario.number().to_string().bold(),
                    entry.scenario.id(),
                    entry.label,
                    entry.badge.unwrap_or(""),
                    card.dimmed()
                )?;
            }
        }
        OutputMode::Json => {
            let rows: Vec<Value> = entries
                .iter()
                .map(|entry| {
                    let card = summary_for(entry.scenario);
                    json!({
                        "number": entry.scenario.number(),
                        "id": entry.scenario.id(),
                        "label": entry.label,
                        "badge": entry.badge,
                        "title": NavigationState::new(entry.scenario).render().title(),
                        "risk_level": card.map(|c| c.risk_level),
                        "impact_score": card.map(|c| c.impact_score),
                    })
                })
                .collect();
            write_json_line(&json!({
                "command": "scenarios",
                "scenarios": rows,
            }))?;
        }
    }
    Ok(())
}

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    match args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    }))?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = Config::load(cli.config.as_deref())?;
            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", config.to_toml()?);
                }
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config show",
                        "config": serde_json::to_value(&config)?,
                    }))?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Validate) => match Config::load(cli.config.as_deref()) {
            Ok(config) => {
                let hash = config.stable_hash()?;
                match output_mode(cli) {
                    OutputMode::Human => {
                        println!("{}", "Configuration is valid.".green());
                        println!("  Source: {}", config.source_path.display());
                        println!("  Hash: {hash}");
                    }
                    OutputMode::Json => {
                        write_json_line(&json!({
                            "command": "config validate",
                            "valid": true,
                            "path": config.source_path.to_string_lossy(),
                            "hash": hash,
                        }))?;
                    }
                }
                Ok(())
            }
            Err(e) => {
                match output_mode(cli) {
                    OutputMode::Human => {
                        eprintln!("{} {e}", "Configuration is INVALID:".red());
                    }
                    OutputMode::Json => {
                        write_json_line(&json!({
                            "command": "config validate",
                            "valid": false,
                            "code": e.code(),
                            "error": e.to_string(),
                        }))?;
                    }
                }
                Err(CliError::User(format!("invalid config: {e}")))
            }
        },
    }
}

fn emit_version(cli: &Cli, args: &VersionArgs) -> Result<(), CliError> {
    let version = env!("CARGO_PKG_VERSION");
    let package = env!("CARGO_PKG_NAME");
    let target = option_env!("TARGET").unwrap_or("unknown");
    let profile = option_env!("PROFILE").unwrap_or("unknown");
    let git_sha = option_env!("GIT_SHA").unwrap_or("unknown");

    match output_mode(cli) {
        OutputMode::Human => {
            println!("legacymod {version}");
            if args.verbose {
                println!("package: {package}");
                println!("target: {target}");
                println!("profile: {profile}");
                println!("git_sha: {git_sha}");
            }
        }
        OutputMode::Json => {
            write_json_line(&json!({
                "binary": "legacymod",
                "version": version,
                "package": package,
                "build": {
                    "target": target,
                    "profile": profile,
                    "git_sha": git_sha,
                }
            }))?;
        }
    }
    Ok(())
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("LEGACYMOD_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacymod::assessment::shell::ViewSettings;

    #[test]
    fn parses_global_flags_before_and_after_subcommand() {
        let before = Cli::try_parse_from([
            "legacymod",
            "--config",
            "/tmp/legacymod.toml",
            "--json",
            "--no-color",
            "scenarios",
        ]);
        assert!(before.is_ok());

        let after = Cli::try_parse_from(["legacymod", "scenarios", "--json", "--no-color"]);
        assert!(after.is_ok());
    }

    #[test]
    fn parses_every_subcommand() {
        let cases = [
            vec!["legacymod", "dashboard"],
            vec!["legacymod", "dashboard", "--start", "scale"],
            vec!["legacymod", "view", "integration", "--threshold", "55", "--width", "90"],
            vec!["legacymod", "view", "3"],
            vec!["legacymod", "metrics"],
            vec!["legacymod", "metrics", "behavior"],
            vec!["legacymod", "config", "path"],
            vec!["legacymod", "config", "show"],
            vec!["legacymod", "config", "validate"],
            vec!["legacymod", "version", "--verbose"],
        ];
        for case in cases {
            let parsed = Cli::try_parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse case: {case:?}");
        }
    }

    #[test]
    fn scenario_arguments_are_validated() {
        assert!(Cli::try_parse_from(["legacymod", "view", "nowhere"]).is_err());
        assert!(Cli::try_parse_from(["legacymod", "view", "7"]).is_err());
        assert!(Cli::try_parse_from(["legacymod", "view"]).is_err());
        assert_eq!(parse_scenario("TIME"), Ok(Scenario::Time));
        assert_eq!(parse_scenario("6"), Ok(Scenario::Dashboard));
    }

    #[test]
    fn completions_support_bash_zsh_and_fish() {
        for shell in ["bash", "zsh", "fish"] {
            let parsed = Cli::try_parse_from(["legacymod", "completions", shell]);
            assert!(parsed.is_ok(), "failed shell parse for {shell}");
        }
    }

    #[test]
    fn output_mode_resolution_honors_precedence() {
        assert_eq!(
            resolve_output_mode(true, Some("human"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("json"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("human"), false),
            OutputMode::Human
        );
        assert_eq!(
            resolve_output_mode(false, Some("auto"), true),
            OutputMode::Human
        );
        assert_eq!(resolve_output_mode(false, None, false), OutputMode::Json);
    }

    #[test]
    fn config_errors_map_to_user_exit_code() {
        let err: CliError = LmError::InvalidConfig {
            details: "bad".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        let err: CliError = LmError::Runtime {
            details: "boom".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn threshold_must_sit_on_the_slider() {
        assert_eq!(check_threshold(55, 5).ok(), Some(55));
        assert_eq!(check_threshold(0, 5).ok(), Some(0));
        assert_eq!(check_threshold(100, 10).ok(), Some(100));
        assert!(matches!(check_threshold(57, 5), Err(CliError::User(_))));
        assert!(matches!(check_threshold(55, 10), Err(CliError::User(_))));
        assert!(matches!(check_threshold(105, 5), Err(CliError::User(_))));
        assert!(matches!(check_threshold(-5, 5), Err(CliError::User(_))));
    }

    #[test]
    fn metric_rows_cover_integration_headline() {
        let vm = Shell::new(Scenario::Integration, ViewSettings::default()).view_model();
        let rows = metric_rows(&vm);
        assert!(rows.contains(&("Avg impact score".to_string(), "76".to_string())));
        assert!(rows.contains(&("Flagged".to_string(), "3".to_string())));
    }

    #[test]
    fn metric_rows_for_dashboard_lead_with_overall_risk() {
        let vm = Shell::new(Scenario::Dashboard, ViewSettings::default()).view_model();
        let rows = metric_rows(&vm);
        assert_eq!(rows[0], ("Overall risk".to_string(), "75".to_string()));
        assert_eq!(rows.len(), 5);
    }
}

//! storeassets CLI binary entry point.
//! Delegates to library modules for generate/feature/validate and prints results.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use storeassets::cli::{Cli, Commands};
use storeassets::config::{self, Effective};
use storeassets::fonts::FontSet;
use storeassets::{feature, generate, output, utils, validate};

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:?}", utils::error_prefix(), e);
            ExitCode::FAILURE
        }
    }
}

fn resolve(repo_root: Option<&str>, root: Option<&str>, output: Option<&str>) -> anyhow::Result<Effective> {
    let eff = config::resolve_effective(repo_root, root, output)
        .context("failed to resolve configuration")?;
    if eff.config_path.is_none() && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No storeassets.toml found; using built-in rules."
        );
    }
    Ok(eff)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            root,
            repo_root,
            output: mode,
        } => {
            let eff = resolve(repo_root.as_deref(), root.as_deref(), mode.as_deref())?;
            if eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!(
                        "Validating {} ({} categories)",
                        utils::display_path(&eff.assets_root, &eff.repo_root),
                        eff.rules.len()
                    )
                );
            }
            let report = validate::run_validate(&eff.assets_root, &eff.rules)
                .with_context(|| format!("validation of {} aborted", eff.assets_root.display()))?;
            output::print_validate(&report, &eff.output, &eff.repo_root);
            Ok(ExitCode::from(report.exit_status()))
        }
        Commands::Generate {
            root,
            repo_root,
            output: mode,
        } => {
            let eff = resolve(repo_root.as_deref(), root.as_deref(), mode.as_deref())?;
            let fonts = FontSet::discover(&eff.fonts);
            let assets = generate::run_generate(&eff.assets_root, &eff.placeholders, &fonts)
                .context("placeholder generation failed")?;
            output::print_generate(&assets, &eff.output, &eff.repo_root);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Feature {
            out,
            root,
            repo_root,
            output: mode,
        } => {
            let eff = resolve(repo_root.as_deref(), root.as_deref(), mode.as_deref())?;
            let out_path = out
                .map(PathBuf::from)
                .unwrap_or_else(|| eff.assets_root.join("feature-graphic/feature_1024x500.png"));
            if eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!("Generating feature graphic ({}x{})", feature::WIDTH, feature::HEIGHT)
                );
            }
            let fonts = FontSet::discover(&eff.fonts);
            let outcome = feature::run_feature(&out_path, &eff.feature, &fonts)
                .context("feature graphic generation failed")?;
            output::print_feature(&outcome, &eff.output, &eff.repo_root);
            Ok(ExitCode::from(outcome.exit_status()))
        }
        Commands::Rules {
            repo_root,
            output: mode,
        } => {
            let eff = resolve(repo_root.as_deref(), None, mode.as_deref())?;
            output::print_rules(&eff.rules, &eff.output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

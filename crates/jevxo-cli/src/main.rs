// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use jevxo_app::AppState;
use jevxo_store::Store;
use runtime::StoreRuntime;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `jevxo --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let log_path = config.log_path();
    logging::init(log_path.as_deref(), &config.log_level())?;

    let store = build_store(&config, &options, OffsetDateTime::now_utc().date())?;

    if options.export_payroll {
        let report = store.payroll_report();
        let json = serde_json::to_string_pretty(&report).context("encode payroll report")?;
        println!("{json}");
        return Ok(());
    }

    if options.check_only {
        info!("startup check passed");
        return Ok(());
    }

    let mut store = store;
    let mut state = AppState {
        active_page: config.start_page(),
        ..AppState::default()
    };
    let mut runtime = StoreRuntime::new(&mut store);
    jevxo_tui::run_app(&mut state, &mut runtime)
}

/// Builds the in-memory store for `today`, seeded unless demo data is
/// turned off by flag or config.
fn build_store(config: &Config, options: &CliOptions, today: time::Date) -> Result<Store> {
    let mut store = Store::new(today);
    if config.seed_demo() && !options.empty {
        store
            .seed_demo_data()
            .context("seed demo data; start with --empty to skip it")?;
    }
    info!(%today, seeded = config.seed_demo() && !options.empty, "store ready");
    Ok(store)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    empty: bool,
    export_payroll: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        empty: false,
        export_payroll: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--empty" => {
                options.empty = true;
            }
            "--export-payroll" => {
                options.export_payroll = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("jevxo agency back office");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --empty                  Start without demo data");
    println!("  --export-payroll         Print the payroll report as JSON and exit");
    println!("  --check                  Validate config and build the store, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, build_store, parse_cli_args};
    use crate::config::Config;
    use anyhow::Result;
    use jevxo_app::{Client, PayrollKind};
    use jevxo_testkit::fixture_date;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/jevxo-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                empty: false,
                export_payroll: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--demo"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument \"--demo\""));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.empty);
        assert!(!options.export_payroll);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_empty_and_export_flags() -> Result<()> {
        let options = parse_cli_args(vec!["--empty", "--export-payroll"], default_options_path())?;
        assert!(options.empty);
        assert!(options.export_payroll);
        assert!(!options.check_only);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn empty_flag_skips_demo_data() -> Result<()> {
        let config = Config::default();
        let seeded = build_store(
            &config,
            &parse_cli_args(Vec::<String>::new(), default_options_path())?,
            fixture_date(),
        )?;
        assert!(!seeded.records::<Client>().is_empty());

        let empty = build_store(
            &config,
            &parse_cli_args(vec!["--empty"], default_options_path())?,
            fixture_date(),
        )?;
        assert!(empty.records::<Client>().is_empty());
        assert_eq!(empty.today(), fixture_date());
        Ok(())
    }

    #[test]
    fn payroll_export_is_json_with_lines_and_totals() -> Result<()> {
        let store = build_store(
            &Config::default(),
            &parse_cli_args(vec!["--export-payroll"], default_options_path())?,
            fixture_date(),
        )?;
        let report = store.payroll_report();
        assert!(report.lines.iter().any(|line| line.kind == PayrollKind::Partner));

        let json: serde_json::Value = serde_json::to_value(&report)?;
        assert!(json["lines"].as_array().is_some_and(|lines| !lines.is_empty()));
        assert!(json["totals"]["total_payable_cents"].is_i64());
        Ok(())
    }
}

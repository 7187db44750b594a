// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;

use anyhow::{Context, Result};
use config::Config;
use macrov_db::{DirSnapshotStore, Store};
use std::env;
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;

fn main() {
    env_logger::init();
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
            "load config {}; run `macrov --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let data_dir = config.data_dir()?;
    let db_name = config.db_name();
    let db_path = data_dir.join(format!("{db_name}.db"));
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    let store = if options.demo {
        Store::memory()
    } else {
        match config.mode() {
            "file" => Store::file(&db_path),
            "memory" => Store::memory(),
            _ => Store::snapshot(
                db_name.to_owned(),
                Box::new(DirSnapshotStore::new(&data_dir)),
            ),
        }
    };

    store.initialize().with_context(|| {
        format!(
            "open database {db_name} under {} -- if this path is wrong, set [storage].data_dir or MACROV_DATA_DIR",
            data_dir.display()
        )
    })?;
    if options.demo {
        store.seed_demo_data()?;
    }
    if options.check_only {
        return Ok(());
    }

    match options.report {
        ReportKind::Counts => print_counts(&store),
        ReportKind::Deltas => print_deltas(&store),
        ReportKind::Losses => print_losses(&store),
    }
}

fn print_counts(store: &Store) -> Result<()> {
    for (table, count) in store.row_counts()? {
        println!("{table:>14}  {count}");
    }
    Ok(())
}

fn print_deltas(store: &Store) -> Result<()> {
    for delta in store.reading_deltas()? {
        let recorded_at = delta
            .recorded_at
            .format(&Rfc3339)
            .context("format reading timestamp")?;
        let previous = delta
            .previous_value
            .map_or_else(|| "-".to_owned(), |value| format!("{value:.2}"));
        println!(
            "meter {:>4}  {recorded_at}  value {:>10.2}  previous {previous:>10}",
            delta.meter_id.get(),
            delta.value,
        );
    }
    Ok(())
}

fn print_losses(store: &Store) -> Result<()> {
    for bucket in store.loss_totals()? {
        println!(
            "cycle {:>3}  {}  total {:.2}",
            bucket.cycle_id.get(),
            bucket.month_label,
            bucket.total,
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Counts,
    Deltas,
    Losses,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    show_help: bool,
    report: ReportKind,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        show_help: false,
        report: ReportKind::Counts,
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
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--deltas" => {
                options.report = ReportKind::Deltas;
            }
            "--losses" => {
                options.report = ReportKind::Losses;
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
    println!("macrov");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Run against seeded demo data (in-memory)");
    println!("  --check                  Validate config + database + seeds, then exit");
    println!("  --deltas                 Print the per-meter reading delta report");
    println!("  --losses                 Print loss totals per cycle and month");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, ReportKind, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/macrov-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_db_path: false,
                print_example: false,
                demo: false,
                check_only: false,
                show_help: false,
                report: ReportKind::Counts,
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
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(!options.print_db_path);
        assert!(!options.demo);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_selects_reports() -> Result<()> {
        let deltas = parse_cli_args(vec!["--deltas"], default_options_path())?;
        assert_eq!(deltas.report, ReportKind::Deltas);

        let losses = parse_cli_args(vec!["--demo", "--losses"], default_options_path())?;
        assert_eq!(losses.report, ReportKind::Losses);
        assert!(losses.demo);
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
}

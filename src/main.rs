use anyhow::Context;
use clap::Parser;
use depara::{cli, config, error, export, loader, report};
use cli::{Cli, Commands};
use config::Config;
use export::ExportOptions;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "depara=debug,depara_common=debug"
    } else {
        "depara=warn,depara_common=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> error::Result<Config> {
    match &cli.config {
        Some(path) if path.exists() => Config::load_from(path),
        Some(_) if matches!(cli.command, Commands::Config { init: true, .. }) => Ok(Config::default()),
        Some(path) => Err(error::DeParaError::FileNotFound(path.display().to_string())),
        None => Config::load(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Run { causes, problems, output, format, top, preview, prefix, dry_run } => {
            println!("🔗 depara - DE-PARA マッピング\n");
            let config = config.with_overrides(prefix, top, preview);
            let options = &config.matching;

            // 1. 読み込み
            println!("[1/3] データを読み込み中...");
            let cause_table = loader::load_table(&causes)
                .with_context(|| format!("Fatos Geradores の読み込みに失敗: {}", causes.display()))?;
            let problem_table = loader::load_table(&problems)
                .with_context(|| format!("Problemas の読み込みに失敗: {}", problems.display()))?;
            println!(
                "✔ Fatos Geradores: {}件 / Problemas: {}件\n",
                cause_table.len(),
                problem_table.len()
            );

            // 2. マッピング
            println!("[2/3] マッピング中...");
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("類似度を計算中...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let matched = depara_common::match_datasets(&problem_table, &cause_table, options);
            spinner.finish_and_clear();

            let (mapped, summary) = match matched {
                Ok(v) => v,
                Err(e) => {
                    let e = error::DeParaError::from(e);
                    if e.is_fatal_input() {
                        eprintln!("⚠ 入力データを確認してください（結果ファイルは作成されません）");
                    }
                    return Err(e.into());
                }
            };
            println!("✔ マッピング完了\n");

            let source_columns = [
                options.reason_field.as_str(),
                options.nature_field.as_str(),
                options.name_field.as_str(),
            ];
            report::print_preview(&mapped, config.preview_rows, source_columns);
            report::print_summary(&summary);

            // 3. 出力
            if dry_run {
                println!("[3/3] ドライラン: ファイルは出力しません");
            } else {
                println!("[3/3] エクスポート中...");
                let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                let export_options = ExportOptions {
                    sheet_name: &config.sheet_name,
                    source_columns,
                };
                export::export_results(&mapped, &format, &output_dir, &config.output_stem, &export_options)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Inspect { file } => {
            let table = loader::load_table(&file)
                .with_context(|| format!("読み込みに失敗: {}", file.display()))?;
            println!("📋 {}", file.display());
            for line in report::table_lines(&table) {
                println!("{}", line);
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = match &cli.config {
                    Some(path) => {
                        Config::default().save_to(path)?;
                        path.clone()
                    }
                    None => Config::default().save()?,
                };
                println!("✔ デフォルト設定を書き出しました: {}", path.display());
            }

            if show || !init {
                println!("設定:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

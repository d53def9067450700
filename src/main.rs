use clap::Parser;
use survey_photos::{aggregator, cli, config, error, export, extractor, pipeline};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SurveyError};
use pipeline::PipelineOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or_else(Commands::default_run) {
        Commands::Run {
            input,
            download_dir,
            dump,
            sql,
            summary_xlsx,
            skip_download,
            concurrency,
            timeout,
        } => {
            println!("🏠 survey-photos - 調査写真の取得と集計\n");

            let config = Config::load_or_default();
            let input = cli::resolve_input(input)?;
            let mut options = PipelineOptions::from_config(&config, input);
            if let Some(dir) = download_dir {
                options = options.with_download_dir(dir);
            }
            if let Some(path) = dump {
                options.outputs.dump_file = path;
            }
            if let Some(path) = sql {
                options.outputs.sql_file = path;
            }
            if let Some(n) = concurrency {
                options.download.max_concurrent = n.max(1);
            }
            if let Some(secs) = timeout {
                options.download.timeout = std::time::Duration::from_secs(secs.max(1));
            }
            options.outputs.summary_file = summary_xlsx;
            options.skip_download = skip_download;

            match pipeline::run(&options).await {
                Ok(summary) => {
                    println!("\n✅ 解析完了");
                    println!("   - {}: 詳細データ", options.outputs.dump_file.display());
                    println!("   - {}: DBインポート用SQL", options.outputs.sql_file.display());
                    if let Some(path) = &options.outputs.summary_file {
                        println!("   - {}: 評価サマリー", path.display());
                    }
                    if summary.downloaded_count > 0 {
                        println!("   - {}/: ダウンロードした写真", options.outputs.download_dir.display());
                    }
                }
                Err(SurveyError::NoData(path)) => {
                    println!("❌ CSVに写真データが見つかりません: {}", path);
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Report { input } => {
            let input = cli::resolve_input(input)?;
            let records = extractor::extract_records(&input)?;
            if records.is_empty() {
                println!("❌ CSVに写真データが見つかりません: {}", input.display());
                return Ok(());
            }

            let (report, _) = aggregator::analyze(&records);
            println!("{}", report);
        }

        Commands::Sql { input, output } => {
            println!("📝 survey-photos - SQLテンプレート再生成\n");

            let records = export::dump::load_dump(&input)?;
            let output = output.unwrap_or_else(|| Config::load_or_default().sql_file);
            export::sql::write_sql_script(&records, &output)?;
            println!("✔ SQL出力: {} ({}件)", output.display(), records.len());
        }

        Commands::Config { show, init } => {
            // 初期化時は壊れた設定をデフォルトで書き直せるようにする
            let config = if init { Config::load_or_default() } else { Config::load()? };
            if init {
                let path = config.save()?;
                println!("✔ 設定ファイルを書き出しました: {}", path.display());
            }

            if show || !init {
                println!("設定:");
                println!("  保存先ディレクトリ: {}", config.download_dir.display());
                println!("  JSONダンプ: {}", config.dump_file.display());
                println!("  SQLテンプレート: {}", config.sql_file.display());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  同時ダウンロード数: {}", config.max_concurrent_downloads);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "survey_photos=debug,info" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

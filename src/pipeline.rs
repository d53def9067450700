//! 一括処理パイプライン
//!
//! 抽出 → 集計（レポート表示）→ ダウンロード → SQL/JSON出力
//!
//! JSONダンプはダウンロード後に書き出すため、成功したレコードの
//! local_path が反映される。

use crate::aggregator;
use crate::config::Config;
use crate::downloader::{self, DownloadOptions, DownloadReport};
use crate::error::{Result, SurveyError};
use crate::export::{self, OutputPaths};
use crate::extractor;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub outputs: OutputPaths,
    pub download: DownloadOptions,
    pub skip_download: bool,
}

impl PipelineOptions {
    pub fn from_config(config: &Config, input: PathBuf) -> Self {
        Self {
            input,
            outputs: OutputPaths {
                download_dir: config.download_dir.clone(),
                dump_file: config.dump_file.clone(),
                sql_file: config.sql_file.clone(),
                summary_file: None,
            },
            download: DownloadOptions {
                target_dir: config.download_dir.clone(),
                timeout: Duration::from_secs(config.timeout_seconds),
                max_concurrent: config.max_concurrent_downloads,
                show_progress: true,
            },
            skip_download: false,
        }
    }

    /// 保存先ディレクトリを変更（ダウンロード設定側も揃える）
    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download.target_dir = dir.clone();
        self.outputs.download_dir = dir;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub record_count: usize,
    pub property_count: usize,
    pub downloaded_count: usize,
    pub failure_count: usize,
}

pub async fn run(options: &PipelineOptions) -> Result<RunSummary> {
    // 1. 抽出
    println!("[1/4] CSVから写真データを抽出中...");
    let mut records = extractor::extract_records(&options.input)?;
    if records.is_empty() {
        return Err(SurveyError::NoData(options.input.display().to_string()));
    }
    println!("✔ {}件の写真データを検出\n", records.len());
    info!(records = records.len(), input = %options.input.display(), "抽出完了");

    // 2. 集計
    println!("[2/4] 評価を集計中...");
    let summaries = aggregator::summarize(&aggregator::group_by_address(&records));
    let property_count = summaries.len();
    println!("{}", aggregator::render_report(records.len(), &summaries));

    // 3. ダウンロード
    let download_report = if options.skip_download {
        println!("[3/4] 写真のダウンロードをスキップ\n");
        DownloadReport::default()
    } else {
        println!("[3/4] 写真をダウンロード中... ({})", options.download.target_dir.display());
        let download_report = downloader::download_photos(&mut records, &options.download).await?;
        if download_report.downloaded.is_empty() {
            println!("ℹ️  写真を取得できませんでした（認証が必要な可能性があります）\n");
        } else {
            println!(
                "✔ {}枚をダウンロード（失敗 {}件）\n",
                download_report.downloaded.len(),
                download_report.failures.len()
            );
        }
        download_report
    };

    // 4. 出力
    println!("[4/4] 結果を出力中...");
    export::export_results(&records, &summaries, &options.outputs)?;

    Ok(RunSummary {
        record_count: records.len(),
        property_count,
        downloaded_count: download_report.downloaded.len(),
        failure_count: download_report.failures.len(),
    })
}

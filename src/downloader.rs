//! 写真ダウンロードモジュール
//!
//! 各レコードの photo_url を取得し、HTTP 200 の場合のみ本文をそのまま保存する。
//! 個々の失敗（ステータス・通信エラー・書き込みエラー）は記録して次へ進み、
//! バッチ全体は中断しない。同時リクエスト数はセマフォで制限する。

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use survey_photos_common::{sanitize_filename, PhotoRecord};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub target_dir: PathBuf,
    pub timeout: Duration,
    pub max_concurrent: usize,
    pub show_progress: bool,
}

impl DownloadOptions {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            timeout: DEFAULT_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            show_progress: false,
        }
    }
}

/// 失敗理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// 200以外のステータス
    Status(u16),
    /// DNS・接続・タイムアウト・URL不正など
    Transport(String),
    /// ファイル書き込み失敗
    Write(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "HTTP {}", code),
            FailureReason::Transport(msg) => write!(f, "通信エラー: {}", msg),
            FailureReason::Write(msg) => write!(f, "書き込みエラー: {}", msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadFailure {
    /// 全レコード中の位置（0始まり）
    pub index: usize,
    pub photo_filename: String,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    /// 成功したレコード（元の順序、local_path設定済み）
    pub downloaded: Vec<PhotoRecord>,
    pub failures: Vec<DownloadFailure>,
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// 保存ファイル名: `NN_<元のファイル名>`（NNは1始まりの連番）
///
/// 元のファイル名が使えない場合はURL末尾、それも駄目なら `photo`。
pub fn local_file_name(index: usize, record: &PhotoRecord) -> String {
    let mut name = sanitize_filename(&record.photo_filename);
    if name.is_empty() {
        name = url_basename(&record.photo_url)
            .map(|s| sanitize_filename(&s))
            .unwrap_or_default();
    }
    if name.is_empty() {
        name = "photo".to_string();
    }
    format!("{:02}_{}", index + 1, name)
}

fn url_basename(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.to_string())
}

/// 全レコードの写真をダウンロード
///
/// 成功したレコードには local_path を設定する。失敗はエラーにならず
/// DownloadReport.failures に入る。保存先ディレクトリの作成失敗のみエラー。
pub async fn download_photos(
    records: &mut [PhotoRecord],
    options: &DownloadOptions,
) -> Result<DownloadReport> {
    tokio::fs::create_dir_all(&options.target_dir).await?;

    let client = build_client(options.timeout)?;
    let semaphore = Arc::new(Semaphore::new(options.max_concurrent.max(1)));
    let progress = progress_bar(records.len(), options.show_progress);
    let total = records.len();

    let mut handles = Vec::with_capacity(total);
    for (index, record) in records.iter().enumerate() {
        let client = client.clone();
        let sem = semaphore.clone();
        let pb = progress.clone();
        let url = record.photo_url.clone();
        let file_name = local_file_name(index, record);
        let path = options.target_dir.join(&file_name);
        let label = record.photo_filename.clone();

        let handle = tokio::spawn(async move {
            let _permit = match sem.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return Err(FailureReason::Transport(e.to_string())),
            };

            debug!(index = index, url = %url, "写真を取得中");
            let outcome = fetch_to_file(&client, &url, &path).await;

            match &outcome {
                Ok(bytes) => {
                    notify(&pb, format!("✅ [{}/{}] {} ({} bytes)", index + 1, total, file_name, bytes));
                }
                Err(reason) => {
                    warn!(index = index, url = %url, reason = %reason, "写真のダウンロードに失敗");
                    notify(&pb, format!("❌ [{}/{}] {}: {}", index + 1, total, label, reason));
                }
            }
            pb.inc(1);

            outcome.map(|_| path)
        });

        handles.push(handle);
    }

    // spawn順にawaitするので結果は元の順序のまま
    let mut report = DownloadReport::default();
    for (index, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(FailureReason::Transport(format!("タスク異常終了: {}", e))),
        };

        match outcome {
            Ok(path) => {
                records[index].local_path = Some(path.to_string_lossy().to_string());
                report.downloaded.push(records[index].clone());
            }
            Err(reason) => report.failures.push(DownloadFailure {
                index,
                photo_filename: records[index].photo_filename.clone(),
                reason,
            }),
        }
    }

    progress.finish_and_clear();
    Ok(report)
}

async fn fetch_to_file(client: &Client, url: &str, path: &Path) -> std::result::Result<usize, FailureReason> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FailureReason::Transport(e.to_string()))?;

    if response.status() != StatusCode::OK {
        return Err(FailureReason::Status(response.status().as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FailureReason::Transport(e.to_string()))?;

    if let Err(e) = tokio::fs::write(path, &bytes).await {
        // 書きかけのファイルは残さない
        let _ = tokio::fs::remove_file(path).await;
        return Err(FailureReason::Write(e.to_string()));
    }

    Ok(bytes.len())
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// 非表示のバーではprintlnが出ないので直接出力
fn notify(pb: &ProgressBar, message: String) {
    if pb.is_hidden() {
        println!("{}", message);
    } else {
        pb.println(message);
    }
}

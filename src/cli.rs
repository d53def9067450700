use crate::error::{Result, SurveyError};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "survey-photos")]
#[command(about = "物件調査CSVの写真取得・評価集計・SQLインポート生成ツール", long_about = None)]
pub struct Cli {
    /// 省略時は run（CSVパスを対話入力）
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 抽出・集計・ダウンロード・出力を一括実行
    Run {
        /// 調査CSVのパス（省略時は対話入力）
        input: Option<PathBuf>,

        /// 写真の保存先ディレクトリ
        #[arg(short, long)]
        download_dir: Option<PathBuf>,

        /// JSONダンプの出力先
        #[arg(long)]
        dump: Option<PathBuf>,

        /// SQLテンプレートの出力先
        #[arg(long)]
        sql: Option<PathBuf>,

        /// 評価サマリーExcelの出力先
        #[arg(long)]
        summary_xlsx: Option<PathBuf>,

        /// 写真のダウンロードを行わない
        #[arg(long)]
        skip_download: bool,

        /// 同時ダウンロード数
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// 1リクエストのタイムアウト（秒）
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// 集計レポートのみ表示
    Report {
        /// 調査CSVのパス（省略時は対話入力）
        input: Option<PathBuf>,
    },

    /// JSONダンプからSQLテンプレートを再生成
    Sql {
        /// JSONダンプ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定を書き出す
        #[arg(long)]
        init: bool,
    },
}

impl Commands {
    /// サブコマンド省略時の動作
    pub fn default_run() -> Self {
        Commands::Run {
            input: None,
            download_dir: None,
            dump: None,
            sql: None,
            summary_xlsx: None,
            skip_download: false,
            concurrency: None,
            timeout: None,
        }
    }
}

/// 入力パスが未指定なら対話で尋ねる
pub fn resolve_input(input: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = input {
        return Ok(path);
    }

    let answer: String = Input::new()
        .with_prompt("CSVファイルのパスを入力")
        .interact_text()
        .map_err(|e| SurveyError::Prompt(e.to_string()))?;

    Ok(PathBuf::from(answer.trim()))
}

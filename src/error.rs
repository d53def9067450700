use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルを開けません: {path} ({source})")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSVに写真データが見つかりません: {0}")]
    NoData(String),

    #[error("CSV解析エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] survey_photos_common::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;

use crate::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 写真の保存先ディレクトリ
    pub download_dir: PathBuf,
    /// JSONダンプの出力先
    pub dump_file: PathBuf,
    /// SQLテンプレートの出力先
    pub sql_file: PathBuf,
    /// 1リクエストあたりのタイムアウト
    pub timeout_seconds: u64,
    /// 同時ダウンロード数の上限
    pub max_concurrent_downloads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("survey_photos"),
            dump_file: PathBuf::from("survey_analysis.json"),
            sql_file: PathBuf::from("import_survey_data.sql"),
            timeout_seconds: 10,
            max_concurrent_downloads: 4,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 読み込めない設定は警告してデフォルト値で続行
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                warn!(error = %e, "設定ファイルの場所を特定できません");
                Self::default()
            }
        }
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "設定ファイルを無視します");
            eprintln!("⚠ 設定ファイルを読み込めないためデフォルト値を使用します: {}", e);
            Self::default()
        })
    }

    /// 設定ファイルがなければデフォルト値
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SurveyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("survey-photos").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(SurveyError::Config("timeout_seconds は1以上を指定してください".into()));
        }
        if self.max_concurrent_downloads == 0 {
            return Err(SurveyError::Config(
                "max_concurrent_downloads は1以上を指定してください".into(),
            ));
        }
        Ok(())
    }
}

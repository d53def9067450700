//! 調査レコードの型定義
//!
//! - PhotoRecord: 写真URLを持つCSVの1行
//! - RatingField: 評価値（生テキスト + 数値解析結果）
//! - Coordinate: 緯度・経度（生テキスト + 数値解析結果）
//!
//! 数値系フィールドは構築時に一度だけ解析し、シリアライズ時は生テキストを
//! そのまま書き出す（ダンプの再読込で値が変わらないように）。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 評価値
///
/// 空でなく、ASCII数字のみで構成される場合だけ数値扱い（`is_numeric()`）。
/// 桁数の上限は設けず、u128に収まらない値は `f64` で保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RatingField {
    raw: String,
    value: Option<f64>,
}

impl RatingField {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_digits(&raw);
        Self { raw, value }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 数字のみで構成されているか
    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

fn parse_digits(raw: &str) -> Option<f64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u128>() {
        Ok(v) => Some(v as f64),
        Err(_) => raw.parse::<f64>().ok(),
    }
}

impl From<String> for RatingField {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for RatingField {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<RatingField> for String {
    fn from(field: RatingField) -> Self {
        field.raw
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 緯度・経度
///
/// 有限の `f64` として解釈できる場合だけ `value()` が `Some` になる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Coordinate {
    raw: String,
    value: Option<f64>,
}

impl Coordinate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = raw.parse::<f64>().ok().filter(|v| v.is_finite());
        Self { raw, value }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl From<String> for Coordinate {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Coordinate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Coordinate> for String {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.raw
    }
}

/// 評価カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingCategory {
    Quiet,
    Safe,
    Clean,
    Friendly,
}

impl RatingCategory {
    /// 出力順
    pub const ALL: [RatingCategory; 4] = [
        RatingCategory::Quiet,
        RatingCategory::Safe,
        RatingCategory::Clean,
        RatingCategory::Friendly,
    ];

    /// 表示ラベル（レポート・SQLコメント用）
    pub fn label(&self) -> &'static str {
        match self {
            RatingCategory::Quiet => "Quiet",
            RatingCategory::Safe => "Safe",
            RatingCategory::Clean => "Clean",
            RatingCategory::Friendly => "Friendly",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 写真付き調査回答1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// 物件の住所（表示用文字列。重複あり）
    pub address: String,

    pub photo_url: String,

    /// 調査プラットフォームが付けた元のファイル名
    #[serde(default)]
    pub photo_filename: String,

    #[serde(default)]
    pub latitude: Coordinate,

    #[serde(default)]
    pub longitude: Coordinate,

    #[serde(default)]
    pub quiet_rating: RatingField,

    #[serde(default)]
    pub safe_rating: RatingField,

    #[serde(default)]
    pub clean_rating: RatingField,

    #[serde(default)]
    pub friendly_rating: RatingField,

    /// 回答日時（解釈しない）
    #[serde(default)]
    pub submission_time: String,

    #[serde(default)]
    pub uuid: String,

    /// 回答者名
    #[serde(default)]
    pub surveyor: String,

    /// ダウンロード成功時のみ設定
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

impl PhotoRecord {
    pub fn rating(&self, category: RatingCategory) -> &RatingField {
        match category {
            RatingCategory::Quiet => &self.quiet_rating,
            RatingCategory::Safe => &self.safe_rating,
            RatingCategory::Clean => &self.clean_rating,
            RatingCategory::Friendly => &self.friendly_rating,
        }
    }

    /// 空でない評価フィールドが1つでもあるか（数値かどうかは問わない）
    pub fn has_any_rating(&self) -> bool {
        RatingCategory::ALL
            .iter()
            .any(|&c| !self.rating(c).is_empty())
    }

    /// 緯度・経度が両方とも有効な場合のみ返す
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude.value()?, self.longitude.value()?))
    }
}

/// JSONダンプからレコード列を復元
pub fn parse_records(json: &str) -> Result<Vec<PhotoRecord>> {
    Ok(serde_json::from_str(json)?)
}

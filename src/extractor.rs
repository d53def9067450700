//! 調査CSVの抽出モジュール
//!
//! セミコロン区切り・ヘッダ付きCSVを列名で参照し、写真URLがある行だけを
//! PhotoRecordに変換する。各フィールドは前後の `"` を除去するのみで、
//! 値の検証は行わない。UTF-8として不正なバイトは置換文字に変換し、行は残す。

use crate::error::{Result, SurveyError};
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use survey_photos_common::{columns, strip_quotes, PhotoRecord};
use tracing::{debug, warn};

pub const DELIMITER: u8 = b';';

/// CSVファイルからレコードを抽出
pub fn extract_records(path: &Path) -> Result<Vec<PhotoRecord>> {
    let content = std::fs::read(path).map_err(|source| SurveyError::FileAccess {
        path: path.display().to_string(),
        source,
    })?;

    extract_from_reader(content.as_slice())
}

/// 任意のリーダーからレコードを抽出
pub fn extract_from_reader<R: Read>(reader: R) -> Result<Vec<PhotoRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = HeaderIndex::new(reader.byte_headers()?);
    let mut records = Vec::new();

    for (row_idx, row) in reader.byte_records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                // 壊れた行は読み飛ばして続行
                warn!(row = row_idx + 1, error = %e, "CSV行を読み飛ばしました");
                continue;
            }
        };

        match headers.to_record(&row) {
            Some(record) => records.push(record),
            None => debug!(row = row_idx + 1, "写真URLなし"),
        }
    }

    Ok(records)
}

/// 列名 → 列位置
struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    fn new(headers: &ByteRecord) -> Self {
        // 同名の列が複数ある場合は後ろの列が優先
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = String::from_utf8_lossy(name);
                let name = name.trim_start_matches('\u{feff}');
                (strip_quotes(name).to_string(), i)
            })
            .collect();
        Self(index)
    }

    /// 列がなければ空文字
    fn field(&self, row: &ByteRecord, column: &str) -> String {
        self.0
            .get(column)
            .and_then(|&i| row.get(i))
            .map(|bytes| strip_quotes(&String::from_utf8_lossy(bytes)).to_string())
            .unwrap_or_default()
    }

    fn to_record(&self, row: &ByteRecord) -> Option<PhotoRecord> {
        let photo_url = self.field(row, columns::PHOTO_URL);
        if photo_url.is_empty() {
            return None;
        }

        Some(PhotoRecord {
            address: self.field(row, columns::ADDRESS),
            photo_url,
            photo_filename: self.field(row, columns::PHOTO_FILENAME),
            latitude: self.field(row, columns::LATITUDE).into(),
            longitude: self.field(row, columns::LONGITUDE).into(),
            quiet_rating: self.field(row, columns::QUIET_RATING).into(),
            safe_rating: self.field(row, columns::SAFE_RATING).into(),
            clean_rating: self.field(row, columns::CLEAN_RATING).into(),
            friendly_rating: self.field(row, columns::FRIENDLY_RATING).into(),
            submission_time: self.field(row, columns::SUBMISSION_TIME),
            uuid: self.field(row, columns::UUID),
            surveyor: self.field(row, columns::SURVEYOR),
            local_path: None,
        })
    }
}

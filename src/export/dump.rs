//! JSONダンプ出力
//!
//! 全レコードを抽出順に整形JSON（インデント2）で書き出す。
//! ダウンロード後に呼べば local_path も含まれる。

use crate::error::{Result, SurveyError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use survey_photos_common::{parse_records, PhotoRecord};

pub fn write_dump(records: &[PhotoRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn load_dump(path: &Path) -> Result<Vec<PhotoRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| SurveyError::FileAccess {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_records(&content)?)
}

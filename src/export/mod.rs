pub mod dump;
pub mod excel;
pub mod sql;

use crate::aggregator::PropertySummary;
use crate::error::Result;
use std::path::PathBuf;
use survey_photos_common::PhotoRecord;

/// 出力先の一式
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub download_dir: PathBuf,
    pub dump_file: PathBuf,
    pub sql_file: PathBuf,
    /// 指定時のみExcelサマリーを出力
    pub summary_file: Option<PathBuf>,
}

pub fn export_results(
    records: &[PhotoRecord],
    summaries: &[PropertySummary],
    paths: &OutputPaths,
) -> Result<()> {
    println!("- SQLテンプレートを生成中...");
    sql::write_sql_script(records, &paths.sql_file)?;
    println!("✔ SQL出力: {}", paths.sql_file.display());

    println!("- JSONダンプを生成中...");
    dump::write_dump(records, &paths.dump_file)?;
    println!("✔ JSON出力: {}", paths.dump_file.display());

    if let Some(summary_file) = &paths.summary_file {
        println!("- Excelサマリーを生成中...");
        excel::write_summary(summaries, summary_file)?;
        println!("✔ Excel出力: {}", summary_file.display());
    }

    Ok(())
}

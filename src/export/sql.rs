//! SQLインポートテンプレート生成
//!
//! - 住所ごとに1件の INSERT（初出順、最初のレコードの座標を使用）
//! - 評価の投入はユーザーIDの対応が未定のため、コメントのテンプレートのみ
//!
//! 住所は必ず sql_escape を通す。座標が数値でなければ NULL。

use crate::aggregator::group_by_address;
use crate::error::Result;
use std::path::Path;
use survey_photos_common::{sql_comment, sql_escape, Coordinate, PhotoRecord, RatingCategory};

const SCRIPT_HEADER: &str = "
-- Import survey data into property ratings app
-- Run this in your Supabase SQL editor

-- First, let's insert the properties if they don't exist
";

const RATINGS_HEADER: &str = "
-- Now insert ratings (you'll need to map to actual user IDs)
-- This is a template - adjust user_id values as needed
";

pub fn build_sql_script(records: &[PhotoRecord]) -> String {
    let mut script = String::from(SCRIPT_HEADER);

    for group in group_by_address(records) {
        let first = group.records[0];
        let address = sql_escape(group.address);
        script.push_str(&format!(
            "\nINSERT INTO property (name, address, lat, lng)\nVALUES ('{}', '{}', {}, {})\nON CONFLICT (address) DO NOTHING;\n",
            address,
            address,
            coordinate_literal(&first.latitude),
            coordinate_literal(&first.longitude),
        ));
    }

    script.push_str(RATINGS_HEADER);

    for record in records.iter().filter(|r| r.has_any_rating()) {
        script.push_str(&format!(
            "\n-- Ratings for {} at {}\n",
            sql_comment(&record.address),
            sql_comment(&record.submission_time)
        ));

        for category in RatingCategory::ALL {
            let rating = record.rating(category);
            if rating.is_numeric() {
                script.push_str(&format!("-- {}: {}/5\n", category.label(), rating.raw()));
            }
        }
    }

    script
}

pub fn write_sql_script(records: &[PhotoRecord], path: &Path) -> Result<()> {
    std::fs::write(path, build_sql_script(records))?;
    Ok(())
}

fn coordinate_literal(coordinate: &Coordinate) -> &str {
    match coordinate.value() {
        Some(_) => coordinate.raw(),
        None => "NULL",
    }
}

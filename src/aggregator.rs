//! 物件ごとの評価集計モジュール
//!
//! 住所の完全一致でグルーピングし、カテゴリ別に数字のみの評価値を平均する。
//! 有効な評価が1件もないカテゴリは結果に含めない。

use std::collections::HashMap;
use survey_photos_common::{PhotoRecord, RatingCategory};

/// 住所ごとのレコード（初出順）
#[derive(Debug, Clone)]
pub struct PropertyGroup<'a> {
    pub address: &'a str,
    pub records: Vec<&'a PhotoRecord>,
}

/// カテゴリ別の平均
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub category: RatingCategory,
    pub average: f64,
    pub count: usize,
}

/// 物件単位の集計結果
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySummary {
    pub address: String,
    pub photo_count: usize,
    /// RatingCategory::ALL の順。有効値のないカテゴリは含まない
    pub ratings: Vec<CategoryAverage>,
    /// 有効な緯度経度の平均
    pub location: Option<(f64, f64)>,
}

impl PropertySummary {
    pub fn rating(&self, category: RatingCategory) -> Option<&CategoryAverage> {
        self.ratings.iter().find(|r| r.category == category)
    }
}

pub fn group_by_address(records: &[PhotoRecord]) -> Vec<PropertyGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<PropertyGroup<'_>> = Vec::new();

    for record in records {
        match index.get(record.address.as_str()) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(&record.address, groups.len());
                groups.push(PropertyGroup {
                    address: &record.address,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

pub fn category_average(records: &[&PhotoRecord], category: RatingCategory) -> Option<CategoryAverage> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.rating(category).value())
        .collect();

    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    Some(CategoryAverage {
        category,
        average: sum / values.len() as f64,
        count: values.len(),
    })
}

fn average_location(records: &[&PhotoRecord]) -> Option<(f64, f64)> {
    let coords: Vec<(f64, f64)> = records.iter().filter_map(|r| r.coordinates()).collect();
    if coords.is_empty() {
        return None;
    }

    let n = coords.len() as f64;
    let lat = coords.iter().map(|c| c.0).sum::<f64>() / n;
    let lng = coords.iter().map(|c| c.1).sum::<f64>() / n;
    Some((lat, lng))
}

impl PropertyGroup<'_> {
    pub fn summarize(&self) -> PropertySummary {
        PropertySummary {
            address: self.address.to_string(),
            photo_count: self.records.len(),
            ratings: RatingCategory::ALL
                .iter()
                .filter_map(|&c| category_average(&self.records, c))
                .collect(),
            location: average_location(&self.records),
        }
    }
}

pub fn summarize(groups: &[PropertyGroup<'_>]) -> Vec<PropertySummary> {
    groups.iter().map(|g| g.summarize()).collect()
}

/// 表示用レポート（平均は小数1桁）
pub fn render_report(total_photos: usize, summaries: &[PropertySummary]) -> String {
    let mut report = String::new();
    report.push_str("📊 調査写真の分析\n");
    report.push_str(&"=".repeat(50));
    report.push('\n');
    report.push_str(&format!("\n🏠 物件数: {}\n", summaries.len()));
    report.push_str(&format!("📸 写真数: {}\n", total_photos));

    for summary in summaries {
        report.push_str(&format!("\n📍 {}\n", summary.address));
        report.push_str(&format!("   写真: {}枚\n", summary.photo_count));

        for rating in &summary.ratings {
            report.push_str(&format!(
                "   {}: {:.1}/5 ({} ratings)\n",
                rating.category.label(),
                rating.average,
                rating.count
            ));
        }

        if let Some((lat, lng)) = summary.location {
            report.push_str(&format!("   位置: {:.6}, {:.6}\n", lat, lng));
        }
    }

    report
}

/// レポートとグルーピングをまとめて返す
pub fn analyze(records: &[PhotoRecord]) -> (String, Vec<PropertyGroup<'_>>) {
    let groups = group_by_address(records);
    let report = render_report(records.len(), &summarize(&groups));
    (report, groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, clean: &str) -> PhotoRecord {
        PhotoRecord {
            address: address.to_string(),
            photo_url: format!("http://x/{}.jpg", address.len()),
            clean_rating: clean.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let records = vec![
            record("B", ""),
            record("A", ""),
            record("B", ""),
            record("C", ""),
            record("A", ""),
        ];
        let groups = group_by_address(&records);

        let addresses: Vec<_> = groups.iter().map(|g| g.address).collect();
        assert_eq!(addresses, vec!["B", "A", "C"]);
        assert_eq!(groups[0].records.len(), 2);
        assert!(std::ptr::eq(groups[0].records[1], &records[2]));
    }

    #[test]
    fn test_group_exact_match_only() {
        let records = vec![record("12 Elm St", ""), record("12 elm st", ""), record("12 Elm St ", "")];
        assert_eq!(group_by_address(&records).len(), 3);
    }

    #[test]
    fn test_average_uses_digit_only_values() {
        let records = vec![
            record("12 Elm St", "4"),
            record("12 Elm St", "5"),
            record("12 Elm St", "abc"),
            record("12 Elm St", ""),
            record("12 Elm St", "4.0"),
        ];
        let refs: Vec<&PhotoRecord> = records.iter().collect();
        let avg = category_average(&refs, RatingCategory::Clean).unwrap();

        assert_eq!(avg.count, 2);
        assert!((avg.average - 4.5).abs() < f64::EPSILON);
    }

    /// 桁数の多い数字のみの評価も有効値として数える
    #[test]
    fn test_average_counts_long_digit_values() {
        let records = vec![record("12 Elm St", "4"), record("12 Elm St", "99999999999")];
        let refs: Vec<&PhotoRecord> = records.iter().collect();
        let avg = category_average(&refs, RatingCategory::Clean).unwrap();

        assert_eq!(avg.count, 2);
        assert!((avg.average - 50000000001.5).abs() < 1e-3);
    }

    #[test]
    fn test_category_without_values_is_absent() {
        let records = vec![record("9 Oak Ave", "abc")];
        let groups = group_by_address(&records);
        let summary = groups[0].summarize();

        assert!(summary.rating(RatingCategory::Clean).is_none());
        assert!(summary.ratings.is_empty());
    }

    #[test]
    fn test_location_average() {
        let mut a = record("12 Elm St", "");
        a.latitude = "10.0".into();
        a.longitude = "20.0".into();
        let mut b = record("12 Elm St", "");
        b.latitude = "12.0".into();
        b.longitude = "22.0".into();
        let mut c = record("12 Elm St", "");
        c.latitude = "bad".into();
        c.longitude = "30.0".into();

        let records = vec![a, b, c];
        let summary = group_by_address(&records)[0].summarize();
        assert_eq!(summary.location, Some((11.0, 21.0)));
    }

    #[test]
    fn test_report_scenario() {
        let records = vec![
            record("12 Elm St", "4"),
            record("12 Elm St", "5"),
            record("9 Oak Ave", "abc"),
        ];
        let (report, groups) = analyze(&records);

        assert_eq!(groups.len(), 2);
        assert!(report.contains("🏠 物件数: 2"));
        assert!(report.contains("📸 写真数: 3"));
        assert!(report.contains("Clean: 4.5/5 (2 ratings)"));

        let oak_section = report.split("📍 9 Oak Ave").nth(1).unwrap();
        assert!(!oak_section.contains("Clean:"));
    }

    #[test]
    fn test_report_rounds_to_one_decimal() {
        let records = vec![record("A", "4"), record("A", "4"), record("A", "5")];
        let (report, _) = analyze(&records);
        assert!(report.contains("Clean: 4.3/5 (3 ratings)"));
    }
}

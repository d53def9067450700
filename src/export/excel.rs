//! 評価サマリーのExcel出力
//!
//! 1物件1行。カテゴリごとに平均と件数の2列、有効値がなければ空欄。

use crate::aggregator::PropertySummary;
use crate::error::{Result, SurveyError};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::Path;
use survey_photos_common::RatingCategory;

const SHEET_NAME: &str = "評価サマリー";

fn excel_error(context: &'static str) -> impl Fn(XlsxError) -> SurveyError {
    move |e| SurveyError::ExcelGeneration(format!("{}: {}", context, e))
}

pub fn write_summary(summaries: &[PropertySummary], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    build_summary_sheet(&mut workbook, summaries)?;
    workbook.save(path).map_err(excel_error("Excel保存エラー"))?;
    Ok(())
}

fn build_summary_sheet(workbook: &mut Workbook, summaries: &[PropertySummary]) -> Result<()> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let average_format = Format::new().set_num_format("0.0");
    let coordinate_format = Format::new().set_num_format("0.000000");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(excel_error("シート名設定エラー"))?;

    // ヘッダ行
    let mut headers: Vec<String> = vec!["住所".into(), "写真数".into()];
    for category in RatingCategory::ALL {
        headers.push(format!("{} 平均", category.label()));
        headers.push(format!("{} 件数", category.label()));
    }
    headers.push("緯度".into());
    headers.push("経度".into());

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(excel_error("ヘッダ書き込みエラー"))?;
    }
    worksheet
        .set_column_width(0, 40.0)
        .map_err(excel_error("列幅設定エラー"))?;
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(excel_error("ウィンドウ枠固定エラー"))?;

    for (i, summary) in summaries.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet
            .write_string(row, 0, &summary.address)
            .map_err(excel_error("住所書き込みエラー"))?;
        worksheet
            .write_number(row, 1, summary.photo_count as f64)
            .map_err(excel_error("写真数書き込みエラー"))?;

        for (offset, category) in RatingCategory::ALL.iter().enumerate() {
            let col = 2 + offset as u16 * 2;
            if let Some(rating) = summary.rating(*category) {
                worksheet
                    .write_number_with_format(row, col, rating.average, &average_format)
                    .map_err(excel_error("平均書き込みエラー"))?;
                worksheet
                    .write_number(row, col + 1, rating.count as f64)
                    .map_err(excel_error("件数書き込みエラー"))?;
            }
        }

        if let Some((lat, lng)) = summary.location {
            let col = 2 + RatingCategory::ALL.len() as u16 * 2;
            worksheet
                .write_number_with_format(row, col, lat, &coordinate_format)
                .map_err(excel_error("緯度書き込みエラー"))?;
            worksheet
                .write_number_with_format(row, col + 1, lng, &coordinate_format)
                .map_err(excel_error("経度書き込みエラー"))?;
        }
    }

    Ok(())
}

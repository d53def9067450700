//! テスト用の共通ヘルパー
//!
//! - ローカルの写真サーバ（axum、空きポート）
//! - 調査CSVの組み立て

#![allow(dead_code)]

use axum::{http::StatusCode, routing::get, Router};
use std::time::Duration;
use survey_photos_common::columns;

pub const FRONT_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x02, 0xFF, 0xD9];
pub const BACK_BYTES: &[u8] = b"back-photo-bytes";

/// 写真サーバを起動してベースURLを返す
///
/// - /photos/front.jpg, /photos/back.jpg: 200
/// - /photos/missing.jpg: 404
/// - /photos/private.jpg: 403
/// - /photos/created.jpg: 201
/// - /photos/slow.jpg: 3秒後に200
pub async fn spawn_photo_server() -> String {
    let app = Router::new()
        .route("/photos/front.jpg", get(|| async { FRONT_BYTES }))
        .route("/photos/back.jpg", get(|| async { BACK_BYTES }))
        .route("/photos/missing.jpg", get(|| async { StatusCode::NOT_FOUND }))
        .route("/photos/private.jpg", get(|| async { (StatusCode::FORBIDDEN, "login required") }))
        .route("/photos/created.jpg", get(|| async { (StatusCode::CREATED, "not quite ok") }))
        .route(
            "/photos/slow.jpg",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                FRONT_BYTES
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// 調査CSVの1行
#[derive(Default, Clone)]
pub struct SurveyRow<'a> {
    pub address: &'a str,
    pub photo_filename: &'a str,
    pub photo_url: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub quiet: &'a str,
    pub safe: &'a str,
    pub clean: &'a str,
    pub friendly: &'a str,
    pub submission_time: &'a str,
    pub uuid: &'a str,
}

/// プラットフォームの出力と同じく全フィールドを引用符で囲んだCSV
pub fn survey_csv(rows: &[SurveyRow<'_>]) -> String {
    let header = [
        columns::ADDRESS,
        columns::PHOTO_FILENAME,
        columns::PHOTO_URL,
        columns::LATITUDE,
        columns::LONGITUDE,
        columns::QUIET_RATING,
        columns::SAFE_RATING,
        columns::CLEAN_RATING,
        columns::FRIENDLY_RATING,
        columns::SUBMISSION_TIME,
        columns::UUID,
    ];

    let mut lines = vec![quote_line(&header)];
    for row in rows {
        lines.push(quote_line(&[
            row.address,
            row.photo_filename,
            row.photo_url,
            row.latitude,
            row.longitude,
            row.quiet,
            row.safe,
            row.clean,
            row.friendly,
            row.submission_time,
            row.uuid,
        ]));
    }

    lines.join("\n") + "\n"
}

fn quote_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(";")
}

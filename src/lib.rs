//! survey-photos
//!
//! 物件調査CSV → 写真取得 → 評価集計 → JSON/SQL出力

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod export;
pub mod extractor;
pub mod pipeline;

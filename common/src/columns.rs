//! 調査CSVの列名
//!
//! 調査プラットフォームのエクスポートに含まれるヘッダ文字列そのもの。
//! 位置ではなく完全一致の列名で参照する。

pub const ADDRESS: &str = "What is the address of the property you are rating?";
pub const PHOTO_URL: &str = "How does the property look right now?_URL";
pub const PHOTO_FILENAME: &str = "How does the property look right now?";
pub const LATITUDE: &str = "_Please verify your proximity to the property you are rating_latitude";
pub const LONGITUDE: &str = "_Please verify your proximity to the property you are rating_longitude";
pub const QUIET_RATING: &str = "How quiet is the property right now?";
pub const SAFE_RATING: &str = "How safe is the property right now?";
pub const CLEAN_RATING: &str = "How clean is the property right now?";
pub const FRIENDLY_RATING: &str = "How friendly is the property right now?";
pub const SUBMISSION_TIME: &str = "_submission_time";
pub const UUID: &str = "_uuid";
pub const SURVEYOR: &str = "What is your name?";

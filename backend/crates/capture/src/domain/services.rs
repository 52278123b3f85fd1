//! Domain Services
//!
//! Pure functions for captions, file names and public URLs.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use kernel::id::CaptureId;

use crate::domain::value_objects::OrderNo;

/// Caption stamped on every watermarked photo
pub fn watermark_caption<Tz>(order_no: &OrderNo, at: &DateTime<Tz>, operator_id: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "ORDER #{} | {} | Operator: {}",
        order_no,
        at.format("%Y-%m-%d %H:%M:%S"),
        operator_id.unwrap_or("N/A")
    )
}

/// Storage-relative path of the untouched upload
pub fn original_path(order_no: &OrderNo, id: &CaptureId) -> String {
    format!("{}/{}_orig.jpg", order_no, id)
}

/// Storage-relative path of the watermarked copy
pub fn stamped_path(order_no: &OrderNo, id: &CaptureId) -> String {
    format!("{}/{}.jpg", order_no, id)
}

/// Public URL of a stored photo under the static files mount
pub fn photo_url(files_prefix: &str, order_no: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}",
        files_prefix.trim_end_matches('/'),
        urlencoding::encode(order_no),
        file_name
    )
}

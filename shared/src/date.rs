//! 时间显示模块
//!
//! 后端时间字段统一解码为 `DateTime<Utc>`，这里只负责展示格式，
//! 客户端不做任何时间计算。

use chrono::{DateTime, Utc};

/// 日期（对应列表中的 "创建于" 一栏）
pub fn format_date(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 日期 + 时间（通知、配送记录）
pub fn format_datetime(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 金额，固定两位小数
pub fn format_money(amount: f64) -> String {
    format!("₱{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_date(Some(&ts)), "2024-03-09");
        assert_eq!(format_datetime(Some(&ts)), "2024-03-09 14:05");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_money(12.5), "₱12.50");
    }
}

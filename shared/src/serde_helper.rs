//! 十进制与时间字段的反序列化辅助
//!
//! 后端把金额、数量等 Decimal 字段序列化为字符串（如 `"12.50"`），
//! 个别接口又直接返回数字。这里统一解码为 `f64`。
//! 时间戳可能不带时区（`USE_TZ=False`），按 UTC 解读。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn parse(raw: NumberOrString) -> Option<f64> {
    match raw {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(s) => s.trim().parse::<f64>().ok(),
    }
}

/// 必填的十进制字段，无法解析时按 0 处理（与页面上的 `parseFloat(x) || 0` 一致）
pub mod decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = NumberOrString::deserialize(deserializer)?;
        Ok(parse(raw).unwrap_or(0.0))
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }
}

/// 可选的十进制字段：缺失、`null` 或无法解析都得到 `None`
pub mod decimal_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<NumberOrString>::deserialize(deserializer)?;
        Ok(raw.and_then(parse))
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 可选的时间字段：RFC 3339 或无时区的本地时间（按 UTC），其余一律 `None`
pub mod datetime_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(parse_datetime))
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(with = "super::decimal")]
        total: f64,
        #[serde(default, with = "super::decimal_opt")]
        price: Option<f64>,
    }

    #[test]
    fn test_decimal_accepts_string_and_number() {
        let a: Priced = serde_json::from_str(r#"{"total":"12.50","price":3}"#).unwrap();
        assert_eq!(a.total, 12.5);
        assert_eq!(a.price, Some(3.0));

        let b: Priced = serde_json::from_str(r#"{"total":7,"price":null}"#).unwrap();
        assert_eq!(b.total, 7.0);
        assert_eq!(b.price, None);
    }

    #[test]
    fn test_decimal_garbage_falls_back() {
        let p: Priced = serde_json::from_str(r#"{"total":"n/a"}"#).unwrap();
        assert_eq!(p.total, 0.0);
        assert_eq!(p.price, None);
    }

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(default, with = "super::datetime_opt")]
        at: Option<DateTime<Utc>>,
    }

    fn stamp(json: &str) -> Option<DateTime<Utc>> {
        serde_json::from_str::<Stamped>(json).unwrap().at
    }

    #[test]
    fn test_datetime_accepts_offset_and_naive() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(stamp(r#"{"at":"2024-03-09T14:05:00Z"}"#), Some(expected));
        assert_eq!(stamp(r#"{"at":"2024-03-09T16:05:00+02:00"}"#), Some(expected));
        assert_eq!(stamp(r#"{"at":"2024-03-09T14:05:00"}"#), Some(expected));
        assert_eq!(stamp(r#"{"at":"2024-03-09 14:05:00.000000"}"#), Some(expected));
    }

    #[test]
    fn test_datetime_garbage_is_none() {
        assert_eq!(stamp(r#"{"at":"yesterday"}"#), None);
        assert_eq!(stamp(r#"{"at":12}"#), None);
        assert_eq!(stamp(r#"{"at":null}"#), None);
        assert_eq!(stamp("{}"), None);
    }
}

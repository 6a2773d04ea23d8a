use serde_json::Value;
use thiserror::Error;

// =========================================================
// 错误分类
// =========================================================

/// 错误分类
///
/// 组件只关心三类失败：网络/HTTP、校验、鉴权。
/// 鉴权失败与 "没有会话" 处理方式相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 请求没有到达后端，或连接中断
    Network,
    /// 后端返回了非 2xx 状态
    Http,
    /// 401 / 403：凭据无效或已过期
    Unauthorized,
    /// 请求发出前的表单校验失败
    Validation,
    /// 响应体无法解析
    Decode,
    /// 本地会话存储读写失败
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK",
            ErrorKind::Http => "HTTP",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Storage => "STORAGE",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {status}")]
    Http { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("session storage error: {0}")]
    Storage(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Http { status, .. } if matches!(status, 401 | 403) => {
                ErrorKind::Unauthorized
            }
            ClientError::Http { .. } => ErrorKind::Http,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// 提取后端给出的可读错误信息
    ///
    /// 顺序：`error` → `detail` → `non_field_errors[0]` → 第一个字段错误
    /// （`field: message`）→ 纯文本响应体 → `fallback`。
    /// 校验错误直接使用自身消息。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Http { body, .. } => {
                extract_backend_message(body).unwrap_or_else(|| fallback.to_string())
            }
            _ => fallback.to_string(),
        }
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(list) => list.first().and_then(first_message),
        _ => None,
    }
}

fn extract_backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        // 非 JSON（例如代理返回的 HTML）不直接展示给用户
        Err(_) if trimmed.starts_with('<') => return None,
        Err(_) => return Some(trimmed.to_string()),
    };

    match &value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            for key in ["error", "detail"] {
                if let Some(msg) = map.get(key).and_then(first_message) {
                    return Some(msg);
                }
            }
            if let Some(msg) = map.get("non_field_errors").and_then(first_message) {
                return Some(msg);
            }
            map.iter()
                .find_map(|(field, v)| first_message(v).map(|msg| format!("{}: {}", field, msg)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ClientError {
        ClientError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_unauthorized_classification() {
        assert_eq!(http(401, "").kind(), ErrorKind::Unauthorized);
        assert_eq!(http(403, "").kind(), ErrorKind::Unauthorized);
        assert_eq!(http(404, "").kind(), ErrorKind::Http);
        assert_eq!(ClientError::network("down").kind(), ErrorKind::Network);
    }

    #[test]
    fn test_user_message_priority() {
        assert_eq!(
            http(400, r#"{"detail":"d","error":"e"}"#).user_message("x"),
            "e"
        );
        assert_eq!(http(400, r#"{"detail":"No access"}"#).user_message("x"), "No access");
        assert_eq!(
            http(400, r#"{"non_field_errors":["Bad pair"]}"#).user_message("x"),
            "Bad pair"
        );
        assert_eq!(
            http(400, r#"{"username":["already taken"]}"#).user_message("x"),
            "username: already taken"
        );
        assert_eq!(http(400, "plain text").user_message("x"), "plain text");
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(http(500, "").user_message("Checkout failed"), "Checkout failed");
        assert_eq!(
            http(502, "<html>bad gateway</html>").user_message("Checkout failed"),
            "Checkout failed"
        );
        assert_eq!(ClientError::network("x").user_message("Failed"), "Failed");
        assert_eq!(
            ClientError::validation("Title is required").user_message("Failed"),
            "Title is required"
        );
    }
}

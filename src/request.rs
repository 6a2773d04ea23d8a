use crate::error::{ClientError, ClientResult};
use farmgate_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// 请求体：除上传接口外一律为 JSON
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn json(value: &serde_json::Value) -> Self {
        RequestBody::Json(value.to_string())
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        // multipart 的 Content-Type（含 boundary）交给底层传输设置
        if let RequestBody::Json(_) = body {
            self.headers
                .insert("Content-Type".to_string(), "application/json".to_string());
        }
        self.body = body;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体（如 204）按 `null` 解析
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ClientError::decode(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
/// 使用 async_trait(?Send)，因为浏览器环境下 fetch 的 Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 实现层: reqwest 客户端 (native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn multipart_form(parts: Vec<FormPart>) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let file = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| ClientError::validation(e.to_string()))?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        builder = match req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart(parts) => builder.multipart(Self::multipart_form(parts)?),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的一次请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn json_body(&self) -> serde_json::Value {
        match &self.body {
            RequestBody::Json(s) => serde_json::from_str(s).unwrap(),
            _ => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // ("METHOD url", 按顺序返回的 (Status, Body) 队列)；队列只剩一个时重复返回
    responses: RefCell<BTreeMap<String, Vec<(u16, String)>>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
    offline: RefCell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.responses
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push((status, body));
    }

    /// 之后的所有请求都以网络错误失败
    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url == url)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        if *self.offline.borrow() {
            return Err(ClientError::network("connection refused"));
        }

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&Self::key(req.method, &req.url)) {
            Some(queue) if queue.len() > 1 => {
                let (status, body) = queue.remove(0);
                Ok(HttpResponse { status, body })
            }
            Some(queue) if !queue.is_empty() => {
                let (status, body) = queue[0].clone();
                Ok(HttpResponse { status, body })
            }
            _ => Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not found."}"#.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type_but_multipart_does_not() {
        let json = HttpRequest::new("/a", HttpMethod::Post)
            .with_body(RequestBody::json(&serde_json::json!({"k": 1})));
        assert_eq!(json.header("Content-Type"), Some("application/json"));

        let multipart = HttpRequest::new("/a", HttpMethod::Post)
            .with_body(RequestBody::Multipart(vec![FormPart::text("title", "Kale")]));
        assert_eq!(multipart.header("Content-Type"), None);
        assert!(multipart.body.is_multipart());
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let resp = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(resp.ok());
        let v: serde_json::Value = resp.json().unwrap();
        assert!(v.is_null());
        assert!(resp.json::<()>().is_ok());
    }

    #[tokio::test]
    async fn test_mock_serves_queue_then_repeats_last() {
        let mock = MockHttpClient::new();
        mock.mock_response(HttpMethod::Get, "/x", 500, serde_json::json!({"error": "boom"}));
        mock.mock_response(HttpMethod::Get, "/x", 200, serde_json::json!([]));

        let first = mock.send(HttpRequest::new("/x", HttpMethod::Get)).await.unwrap();
        let second = mock.send(HttpRequest::new("/x", HttpMethod::Get)).await.unwrap();
        let third = mock.send(HttpRequest::new("/x", HttpMethod::Get)).await.unwrap();
        assert_eq!((first.status, second.status, third.status), (500, 200, 200));
        assert_eq!(mock.request_count(), 3);
    }
}

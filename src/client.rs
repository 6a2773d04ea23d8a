//! HTTP 客户端适配器
//!
//! 所有资源模块都通过 [`ApiClient`] 发请求。会话存储以泛型参数显式注入，
//! 每次发送前读取其中的令牌并附加 `Authorization: Bearer <token>`。

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse, RequestBody};
use crate::session::SessionStore;
use farmgate_shared::protocol::{ApiRequest, HttpMethod};
use farmgate_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

/// 单次请求的附加选项
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// 查询参数，原样透传
    pub query: Vec<(String, String)>,
    /// 额外请求头，优先级最高
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

pub struct ApiClient<H, S> {
    config: ClientConfig,
    http: Arc<H>,
    session: Arc<S>,
    /// 默认请求头，`set_credential` / `clear_credential` 修改这里
    default_headers: Arc<RwLock<BTreeMap<String, String>>>,
}

impl<H, S> Clone for ApiClient<H, S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            http: Arc::clone(&self.http),
            session: Arc::clone(&self.session),
            default_headers: Arc::clone(&self.default_headers),
        }
    }
}

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub fn new(config: ClientConfig, http: H, session: S) -> Self {
        Self {
            config,
            http: Arc::new(http),
            session: Arc::new(session),
            default_headers: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    // =========================================================
    // 凭据管理
    // =========================================================

    /// 设置（或移除）默认的 Authorization 头
    pub fn set_credential(&self, token: Option<&str>) {
        if let Ok(mut headers) = self.default_headers.write() {
            match token {
                Some(token) => {
                    headers.insert(
                        HEADER_AUTHORIZATION.to_string(),
                        format!("{}{}", BEARER_PREFIX, token),
                    );
                }
                None => {
                    headers.remove(HEADER_AUTHORIZATION);
                }
            }
        }
    }

    /// 清除会话存储与默认头中的凭据
    pub fn clear_credential(&self) {
        self.session.clear();
        self.set_credential(None);
    }

    /// 会话存储中当前的令牌
    pub fn stored_credential(&self) -> Option<String> {
        self.session.read()
    }

    // =========================================================
    // 请求
    // =========================================================

    fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = self.config.url(path);
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
                .collect();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded.join("&"));
        }
        url
    }

    /// 发送一个请求，非 2xx 响应转换为 [`ClientError::Http`]
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse> {
        let url = self.build_url(path, &options.query);
        let mut req = HttpRequest::new(&url, method).with_body(body);

        if let Ok(headers) = self.default_headers.read() {
            for (k, v) in headers.iter() {
                req = req.with_header(k, v);
            }
        }

        // 存储中的令牌优先于默认头
        match self.session.read() {
            Some(token) => {
                debug!(method = method.as_str(), path, "attaching stored credential");
                req = req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
            }
            None => debug!(method = method.as_str(), path, "no stored credential"),
        }

        for (k, v) in &options.headers {
            req = req.with_header(k, v);
        }

        let resp = match self.http.send(req).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(method = method.as_str(), path, error = %e, "request failed");
                return Err(e);
            }
        };

        if !resp.ok() {
            error!(
                method = method.as_str(),
                path,
                status = resp.status,
                payload = %resp.body,
                "request failed"
            );
            return Err(ClientError::Http {
                status: resp.status,
                body: resp.body,
            });
        }

        Ok(resp)
    }

    /// 执行一个协议请求并解析响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        let body = match req.body() {
            Some(value) => RequestBody::json(&value),
            None => RequestBody::Empty,
        };
        let resp = self
            .request(R::METHOD, &req.path(), body, RequestOptions::with_query(req.query()))
            .await?;
        resp.json()
    }
}

/// 查询参数的百分号编码（RFC 3986 unreserved 字符保持原样）
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests;

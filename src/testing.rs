//! 测试辅助：预置 MockHttpClient 与内存会话的客户端

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::request::MockHttpClient;
use crate::session::MemorySessionStore;
use farmgate_shared::protocol::HttpMethod;
use serde_json::Value;

pub const TEST_BASE: &str = "http://api.test";

pub type TestClient = ApiClient<MockHttpClient, MemorySessionStore>;

pub fn test_client() -> TestClient {
    ApiClient::new(
        ClientConfig::with_base_url(TEST_BASE),
        MockHttpClient::new(),
        MemorySessionStore::new(),
    )
}

pub fn url(path: &str) -> String {
    format!("{}{}", TEST_BASE, path)
}

/// 按路径（不含 base）注册响应
pub fn mock(client: &TestClient, method: HttpMethod, path: &str, status: u16, body: Value) {
    client.http().mock_response(method, &url(path), status, body);
}

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::protocol::{Ack, LoginRequest, MeRequest, RegisterRequest};
use farmgate_shared::{Credentials, Registration, TokenPair, User};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    /// 换取访问令牌（不修改会话）
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<TokenPair> {
        self.call(&LoginRequest(credentials.clone())).await
    }

    /// 当前凭据对应的用户
    pub async fn me(&self) -> ClientResult<User> {
        self.call(&MeRequest).await
    }

    /// 按角色注册
    pub async fn register(&self, registration: &Registration) -> ClientResult<Ack> {
        self.call(&RegisterRequest(registration.clone())).await
    }
}

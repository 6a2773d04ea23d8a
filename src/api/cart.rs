use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::protocol::{
    Ack, AddToCartRequest, CartCheckoutRequest, GetCartRequest, RemoveCartItemRequest,
    UpdateCartItemRequest,
};
use farmgate_shared::{CartItem, CheckoutResponse};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn get_cart(&self) -> ClientResult<Vec<CartItem>> {
        self.call(&GetCartRequest).await
    }

    pub async fn add_to_cart(&self, post: u64, quantity: f64) -> ClientResult<Ack> {
        self.call(&AddToCartRequest { post, quantity }).await
    }

    pub async fn update_cart_item(&self, id: u64, quantity: f64) -> ClientResult<Ack> {
        self.call(&UpdateCartItemRequest { id, quantity }).await
    }

    pub async fn remove_cart_item(&self, id: u64) -> ClientResult<Ack> {
        self.call(&RemoveCartItemRequest { id }).await
    }

    /// 购物车自带的结算接口；购物车视图实际走 [`ApiClient::checkout`]
    pub async fn checkout_cart_legacy(&self) -> ClientResult<CheckoutResponse> {
        self.call(&CartCheckoutRequest).await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{mock, test_client};
    use farmgate_shared::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_to_cart_body() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/cart/", 201, json!({"id": 1}));

        client.add_to_cart(12, 2.5).await.unwrap();

        let last = client.http().last_request().unwrap();
        assert_eq!(last.json_body(), json!({ "post": 12, "quantity": 2.5 }));
    }

    #[tokio::test]
    async fn test_cart_items_decode_string_decimals() {
        let client = test_client();
        mock(
            &client,
            HttpMethod::Get,
            "/api/cart/",
            200,
            json!([{
                "id": 4,
                "quantity": "3",
                "post": { "id": 12, "title": "Eggs", "content": "", "price": "7.50", "unit": "KG" }
            }]),
        );

        let items = client.get_cart().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line_total(), 22.5);
    }
}

//! 浏览器端 HTTP 传输
//!
//! 基于 `gloo-net` 的 fetch 封装实现核心库的 [`HttpClient`]。
//! multipart 请求体转换为 `FormData`，Content-Type 由浏览器连同 boundary 一起设置。

use farmgate::error::{ClientError, ClientResult};
use farmgate::request::{FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody};
use farmgate_shared::protocol::HttpMethod;
use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn build_error(e: JsValue) -> ClientError {
    ClientError::network(format!("Fetch Build Error: {:?}", e))
}

fn form_data(parts: Vec<FormPart>) -> ClientResult<FormData> {
    let form = FormData::new().map_err(build_error)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => {
                form.append_with_str(&name, &value).map_err(build_error)?;
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let options = BlobPropertyBag::new();
                options.set_type(&content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(
                    &js_sys::Array::of1(&array),
                    &options,
                )
                .map_err(build_error)?;
                form.append_with_blob_and_filename(&name, &blob, &file_name)
                    .map_err(build_error)?;
            }
        }
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        let request = match req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        }
        .map_err(|e| ClientError::network(format!("Fetch Build Error: {}", e)))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Fetch Error: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Fetch Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

//! 读取 `<input type="file">` 中选中的文件

use farmgate::api::ImageFile;
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement, Url};

/// 取出输入框中的文件并清空选择，便于再次选择同一文件
pub fn take_selected(ev: &leptos::ev::Event) -> Vec<File> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let mut files = Vec::new();
    if let Some(list) = input.files() {
        for idx in 0..list.length() {
            if let Some(file) = list.get(idx) {
                files.push(file);
            }
        }
    }
    input.set_value("");
    files
}

/// 读取文件内容，并生成用于预览的 object URL
pub async fn read_image(file: &File) -> Option<(ImageFile, String)> {
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let preview = Url::create_object_url_with_blob(file).ok()?;
    Some((
        ImageFile {
            file_name: file.name(),
            content_type: file.type_(),
            bytes,
        },
        preview,
    ))
}

pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}

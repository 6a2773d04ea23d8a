use super::{StateCell, parse_quantity};
use crate::api::ImageFile;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES, MAX_POST_IMAGES, PostDraft, Unit};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 1000;

const UPLOAD_FAILED: &str =
    "Post created but image upload failed. You can try uploading images later.";

/// 已选择、尚未（或已经）上传的图片
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub id: String,
    pub file: ImageFile,
    /// 预览地址，由界面生成
    pub preview: String,
    pub uploaded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostFormView {
    pub title: String,
    pub content: String,
    pub price: String,
    pub quantity: String,
    pub unit: Unit,
    pub images: Vec<PendingImage>,
    /// 帖子已创建但图片未传完时保留，重新提交只重试上传
    pub created_post_id: Option<u64>,
    pub submitting: bool,
    pub uploading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Default for PostFormView {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            price: String::new(),
            quantity: String::new(),
            unit: Unit::Kg,
            images: Vec::new(),
            created_post_id: None,
            submitting: false,
            uploading: false,
            error: None,
            success: None,
        }
    }
}

fn check_image(file: &ImageFile) -> Result<(), String> {
    if file.size() > MAX_IMAGE_BYTES {
        return Err(format!("\"{}\" is too large (max 5MB).", file.file_name));
    }
    if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
        return Err(format!(
            "\"{}\" has unsupported format. Allowed: JPEG, PNG, GIF, WebP.",
            file.file_name
        ));
    }
    Ok(())
}

/// 发帖失败的提示：500 固定文案，其次 detail、non_field_errors，
/// 最后把所有字段错误拼接起来
pub fn create_error_message(err: &ClientError) -> String {
    const FALLBACK: &str = "Failed to create post";
    let ClientError::Http { status, body } = err else {
        return err.user_message(FALLBACK);
    };
    if *status == 500 {
        return "Server error - please contact support or check backend logs".to_string();
    }
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return err.user_message(FALLBACK);
    };
    if let Some(Value::String(detail)) = map.get("detail") {
        return detail.clone();
    }
    if let Some(first) = map
        .get("non_field_errors")
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
    {
        return first.to_string();
    }
    let fields: Vec<String> = map
        .iter()
        .map(|(field, msgs)| {
            let msg = match msgs {
                Value::Array(list) => list.first().cloned().unwrap_or(Value::Null),
                other => other.clone(),
            };
            match msg {
                Value::String(s) => format!("{}: {}", field, s),
                other => format!("{}: {}", field, other),
            }
        })
        .collect();
    if fields.is_empty() {
        FALLBACK.to_string()
    } else {
        fields.join(", ")
    }
}

impl PostFormView {
    pub fn can_add_images(&self) -> bool {
        self.images.len() < MAX_POST_IMAGES
    }

    /// 添加图片。超过总数上限时一张都不添加；单个文件过大或格式不符时跳过该文件。
    pub fn add_images(&mut self, files: Vec<(ImageFile, String)>) {
        let total = self.images.len() + files.len();
        if total > MAX_POST_IMAGES {
            self.error = Some(format!(
                "Maximum {} images allowed. You have {}, trying to add {}.",
                MAX_POST_IMAGES,
                self.images.len(),
                files.len()
            ));
            return;
        }

        self.error = None;
        for (file, preview) in files {
            if let Err(msg) = check_image(&file) {
                self.error = Some(msg);
                continue;
            }
            self.images.push(PendingImage {
                id: Uuid::new_v4().to_string(),
                file,
                preview,
                uploaded: false,
            });
        }
    }

    pub fn remove_image(&mut self, id: &str) {
        self.images.retain(|img| img.id != id);
    }

    fn pending_files(&self) -> Vec<ImageFile> {
        self.images
            .iter()
            .filter(|img| !img.uploaded)
            .map(|img| img.file.clone())
            .collect()
    }

    /// 必填校验并生成提交内容
    pub fn draft(&self) -> Result<PostDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err("Description is required".to_string());
        }
        Ok(PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            price: parse_quantity(&self.price),
            quantity: parse_quantity(&self.quantity),
            unit: self.unit,
        })
    }

    /// 提交开始；校验失败时设置错误并返回 `None`
    pub fn on_submit(&mut self) -> Option<PostDraft> {
        self.error = None;
        self.success = None;
        match self.draft() {
            Ok(draft) => {
                self.submitting = true;
                Some(draft)
            }
            Err(msg) => {
                self.error = Some(msg);
                None
            }
        }
    }

    pub fn on_created(&mut self, post_id: u64) {
        self.created_post_id = Some(post_id);
        if self.images.iter().any(|img| !img.uploaded) {
            self.uploading = true;
        }
    }

    pub fn on_uploaded(&mut self, result: Result<(), String>) {
        self.uploading = false;
        match result {
            Ok(()) => self.images.iter_mut().for_each(|img| img.uploaded = true),
            Err(msg) => {
                self.submitting = false;
                self.error = Some(msg);
            }
        }
    }

    pub fn on_failed(&mut self, msg: String) {
        self.submitting = false;
        self.uploading = false;
        self.error = Some(msg);
    }

    /// 成功后重置表单
    pub fn on_success(&mut self) {
        *self = Self {
            success: Some("Post created successfully!".to_string()),
            ..Self::default()
        };
    }
}

/// 创建帖子（multipart）后上传图片，成功时返回新帖子 id
pub async fn submit<H, S, C>(client: &ApiClient<H, S>, state: &C) -> Option<u64>
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<PostFormView>,
{
    let (draft, existing) = state.update(|s| (s.on_submit(), s.created_post_id))?;
    let draft = draft?;

    let post_id = match existing {
        Some(id) => {
            state.update(|s| s.on_created(id))?;
            id
        }
        None => match client.create_post_multipart(&draft).await {
            Ok(post) => {
                info!(post_id = post.id, "post created");
                state.update(|s| s.on_created(post.id))?;
                post.id
            }
            Err(e) => {
                error!(error = %e, "post creation failed");
                state.update(|s| s.on_failed(create_error_message(&e)));
                return None;
            }
        },
    };

    let files = state.read(|s| s.pending_files())?;
    if !files.is_empty() {
        let result = client
            .upload_images(post_id, files)
            .await
            .map(|_| ())
            .map_err(|e| {
                error!(post_id, error = %e, "image upload failed");
                UPLOAD_FAILED.to_string()
            });
        let failed = result.is_err();
        state.update(|s| s.on_uploaded(result));
        if failed {
            return None;
        }
    }

    state.update(|s| s.on_success());
    Some(post_id)
}

#[cfg(test)]
mod tests;

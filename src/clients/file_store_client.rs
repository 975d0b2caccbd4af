/// 文件存储客户端
///
/// 封装与文件存储服务之间的 multipart 上传调用
use crate::config::Config;
use crate::error::FileStoreError;
use crate::models::{FormField, UploadForm};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

/// 文件存储服务
///
/// 一次调用对应一个请求：要么整张表单被接受，要么都不算提交
#[async_trait]
pub trait FileStore: Send + Sync {
    /// 上传表单，返回服务端的确认数据
    async fn upload(&self, form: UploadForm) -> Result<Value, FileStoreError>;

    /// 服务地址（用于日志）
    fn endpoint(&self) -> &str;
}

/// 基于 HTTP 的文件存储客户端
#[derive(Clone, Debug)]
pub struct HttpFileStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFileStore {
    /// 创建新的文件存储客户端
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.file_store_endpoint.clone())
    }

    /// 构建 reqwest multipart 表单
    fn build_multipart(&self, form: UploadForm) -> Result<Form, FileStoreError> {
        let mut multipart = Form::new();

        for field in form.into_fields() {
            multipart = match field {
                FormField::File { name, file } => {
                    let length = file.data.len() as u64;
                    let part = Part::stream_with_length(file.data, length)
                        .file_name(file.name)
                        .mime_str(&file.mime_type)
                        .map_err(|e| FileStoreError::transport(&self.endpoint, e))?;
                    multipart.part(name, part)
                }
                FormField::Text { name, value } => multipart.text(name, value),
            };
        }

        Ok(multipart)
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn upload(&self, form: UploadForm) -> Result<Value, FileStoreError> {
        debug!(
            "上传 {} 个文件到 {}",
            form.file_count(),
            self.endpoint
        );

        let multipart = self.build_multipart(form)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| FileStoreError::transport(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileStoreError::Rejected {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        // 读取响应体时断线属于传输失败，只有 JSON 解析失败才算响应格式错误
        let confirmation: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                FileStoreError::malformed(&self.endpoint, e)
            } else {
                FileStoreError::transport(&self.endpoint, e)
            }
        })?;

        debug!("上传结果: {}", confirmation);

        Ok(confirmation)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

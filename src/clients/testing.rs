//! 测试用的文件存储替身

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::clients::FileStore;
use crate::error::FileStoreError;
use crate::models::UploadForm;

/// 替身的响应方式
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Accept,
    Reject(u16),
    TransportFailure,
}

/// 记录每次上传的表单，按预设方式响应
pub struct RecordingStore {
    reply: Mutex<Reply>,
    calls: AtomicUsize,
    forms: Mutex<Vec<UploadForm>>,
    /// 设置后，每次上传需要先拿到一个许可才返回
    gate: Option<Arc<Semaphore>>,
}

impl RecordingStore {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            forms: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// 上传会一直挂起，直到 gate 中放入许可
    pub fn gated(reply: Reply, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn forms(&self) -> Vec<UploadForm> {
        self.forms.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for RecordingStore {
    async fn upload(&self, form: UploadForm) -> Result<Value, FileStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let files = form.file_count();
        self.forms.lock().unwrap().push(form);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let reply = *self.reply.lock().unwrap();
        match reply {
            Reply::Accept => Ok(json!({ "files": files })),
            Reply::Reject(status) => Err(FileStoreError::Rejected {
                endpoint: self.endpoint().to_string(),
                status,
                reason: "Rejected".to_string(),
            }),
            Reply::TransportFailure => Err(FileStoreError::transport(
                self.endpoint(),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }

    fn endpoint(&self) -> &str {
        "memory://files"
    }
}

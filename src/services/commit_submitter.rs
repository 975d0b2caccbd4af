//! 提交服务 - 业务能力层
//!
//! 只负责"把暂存列表一次性提交到文件存储"这一能力

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clients::FileStore;
use crate::error::CommitError;
use crate::models::{PendingUpload, UploadForm};
use crate::services::DraftStager;

/// 提交结果
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    /// 文件存储返回的确认数据
    pub confirmation: Value,
    /// 本次提交的条目数
    pub committed: usize,
}

/// 提交服务
///
/// 职责：
/// - 把暂存条目按顺序序列化成一个 multipart 表单
/// - 对文件存储只发一次请求，不重试、不分片
/// - 成功后清空暂存列表，失败时原样保留以便人工重试
#[derive(Clone)]
pub struct CommitSubmitter {
    store: Arc<dyn FileStore>,
}

impl CommitSubmitter {
    /// 创建新的提交服务
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// 提交暂存列表
    ///
    /// 成功时清空暂存列表；任何失败都不修改暂存列表。
    /// 选择缓冲区不受影响。
    pub async fn commit(&self, stager: &mut DraftStager) -> Result<CommitOutcome, CommitError> {
        let outcome = self.submit(stager.staged()).await?;
        stager.clear_staged();
        Ok(outcome)
    }

    /// 提交给定条目，不触碰任何暂存器
    pub async fn submit(&self, entries: &[PendingUpload]) -> Result<CommitOutcome, CommitError> {
        if entries.is_empty() {
            return Err(CommitError::Empty);
        }

        let form = UploadForm::from_entries(entries);
        debug!(
            "提交表单: {} 个字段 / {} 个文件",
            form.fields().len(),
            form.file_count()
        );

        info!(
            "📤 正在提交 {} 个文件到 {}",
            entries.len(),
            self.store.endpoint()
        );

        match self.store.upload(form).await {
            Ok(confirmation) => {
                info!("✓ 文件保存成功");
                Ok(CommitOutcome {
                    confirmation,
                    committed: entries.len(),
                })
            }
            Err(e) => {
                warn!("⚠️ 文件保存失败: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{RecordingStore, Reply};
    use crate::error::FileStoreError;
    use crate::models::{DocumentType, FileBlob, FormField, Language};
    use tokio_test::{assert_err, assert_ok};

    fn blob(name: &str) -> FileBlob {
        FileBlob::new(name, "image/png", vec![1u8, 2, 3])
    }

    fn staged(names: &[&str], lang: Language, ty: DocumentType) -> DraftStager {
        let mut stager = DraftStager::new();
        stager.choose_files(names.iter().map(|n| blob(n)).collect());
        stager.promote(Some(lang), Some(ty)).unwrap();
        stager
    }

    #[tokio::test]
    async fn test_empty_commit_makes_no_call() {
        let store = Arc::new(RecordingStore::new(Reply::Accept));
        let submitter = CommitSubmitter::new(store.clone());
        let mut stager = DraftStager::new();

        let err = submitter.commit(&mut stager).await.unwrap_err();

        assert!(matches!(err, CommitError::Empty));
        assert!(!err.is_retryable());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_commit_sends_one_request_in_staged_order() {
        let store = Arc::new(RecordingStore::new(Reply::Accept));
        let submitter = CommitSubmitter::new(store.clone());
        let mut stager = staged(&["a.png", "b.png"], Language::English, DocumentType::Certificate);
        stager.choose_files(vec![blob("c.png")]);
        stager
            .promote(Some(Language::Polish), Some(DocumentType::Other))
            .unwrap();

        let outcome = assert_ok!(submitter.commit(&mut stager).await);

        assert_eq!(outcome.committed, 3);
        assert_eq!(outcome.confirmation["files"], 3);
        assert_eq!(store.calls(), 1);

        let forms = store.forms();
        let files: Vec<&str> = forms[0]
            .fields()
            .iter()
            .filter_map(|f| match f {
                FormField::File { file, .. } => Some(file.name.as_str()),
                FormField::Text { .. } => None,
            })
            .collect();
        assert_eq!(files, vec!["a.png", "b.png", "c.png"]);
        assert!(stager.is_empty());
    }

    #[tokio::test]
    async fn test_success_keeps_selection() {
        let store = Arc::new(RecordingStore::new(Reply::Accept));
        let submitter = CommitSubmitter::new(store);
        let mut stager = staged(&["a.png"], Language::German, DocumentType::Instruction);
        stager.choose_files(vec![blob("pending.png")]);

        assert_ok!(submitter.commit(&mut stager).await);

        assert!(stager.is_empty());
        assert_eq!(stager.selection().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_leave_staged_list_unchanged() {
        for reply in [Reply::Reject(500), Reply::TransportFailure] {
            let store = Arc::new(RecordingStore::new(reply));
            let submitter = CommitSubmitter::new(store.clone());
            let mut stager =
                staged(&["a.png", "b.png"], Language::English, DocumentType::CatalogCard);
            let before = stager.staged().to_vec();

            let err = assert_err!(submitter.commit(&mut stager).await);

            assert!(err.is_retryable());
            assert_eq!(stager.staged(), before.as_slice());
            assert_eq!(store.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_transport_and_rejection_are_distinguished() {
        let store = Arc::new(RecordingStore::new(Reply::Reject(413)));
        let submitter = CommitSubmitter::new(store.clone());
        let mut stager = staged(&["a.png"], Language::English, DocumentType::Other);

        match submitter.commit(&mut stager).await {
            Err(CommitError::Store(FileStoreError::Rejected { status, .. })) => {
                assert_eq!(status, 413)
            }
            other => panic!("应为 Rejected: {:?}", other),
        }

        store.set_reply(Reply::TransportFailure);
        match submitter.commit(&mut stager).await {
            Err(CommitError::Store(FileStoreError::Transport { .. })) => {}
            other => panic!("应为 Transport: {:?}", other),
        }

        // 手动重试成功
        store.set_reply(Reply::Accept);
        assert_ok!(submitter.commit(&mut stager).await);
        assert!(stager.is_empty());
        assert_eq!(store.calls(), 3);
    }
}

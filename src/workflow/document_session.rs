//! 文档会话 - 流程层
//!
//! 一个会话对应一个挂载的文档组件实例：持有自己的选择缓冲区和暂存列表，
//! 并显式维护 `Submitting` 状态。
//!
//! ```text
//! Empty --promote--> Staged --promote--> Staged
//! Staged --commit--> Submitting --成功--> Empty
//!                               --失败--> Staged
//! ```
//!
//! 提交进行中：
//! - 再次 commit 直接返回 `AlreadySubmitting`，不发请求
//! - promote 仍然允许，新条目排在提交快照之后
//! - remove / reclassify 返回 `Locked`，保证按位置的身份在结果返回前不变

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::error::{CommitError, StageError};
use crate::models::{DocumentType, FileBlob, Language, PendingUpload};
use crate::services::{CommitOutcome, CommitSubmitter, DraftStager};

/// 暂存列表的聚合状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    /// 暂存列表为空
    Empty,
    /// 暂存列表非空
    Staged,
    /// 提交进行中
    Submitting,
}

#[derive(Debug, Default)]
struct SessionState {
    stager: DraftStager,
    submitting: bool,
}

/// 文档会话
pub struct DocumentSession {
    state: Mutex<SessionState>,
    submitter: CommitSubmitter,
}

impl DocumentSession {
    pub fn new(submitter: CommitSubmitter) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            submitter,
        }
    }

    /// 替换选择缓冲区
    pub fn choose_files(&self, selection: Vec<FileBlob>) {
        self.state().stager.choose_files(selection);
    }

    /// 将已选择的文件按分类加入暂存列表
    pub fn promote(
        &self,
        language: Option<Language>,
        document_type: Option<DocumentType>,
    ) -> Result<usize, StageError> {
        Ok(self.state().stager.promote(language, document_type)?)
    }

    /// 按位置删除暂存条目
    pub fn remove(&self, index: usize) -> Result<PendingUpload, StageError> {
        let mut state = self.state();
        if state.submitting {
            return Err(StageError::Locked);
        }
        state.stager.remove(index)
    }

    /// 按位置重新分类
    pub fn reclassify(
        &self,
        index: usize,
        language: Language,
        document_type: DocumentType,
    ) -> Result<(), StageError> {
        let mut state = self.state();
        if state.submitting {
            return Err(StageError::Locked);
        }
        state.stager.reclassify(index, language, document_type)
    }

    /// 提交暂存列表
    ///
    /// 提交的是调用时刻的快照；成功后只移除快照中的条目。
    /// future 在完成前被丢弃时，状态回到提交前。
    pub async fn commit(&self) -> Result<CommitOutcome, CommitError> {
        let snapshot = {
            let mut state = self.state();
            if state.submitting {
                return Err(CommitError::AlreadySubmitting);
            }
            if state.stager.is_empty() {
                return Err(CommitError::Empty);
            }
            state.submitting = true;
            state.stager.staged().to_vec()
        };

        let guard = SubmittingGuard { session: self };
        let result = self.submitter.submit(&snapshot).await;
        // 解锁和移除快照必须在同一次加锁内完成
        std::mem::forget(guard);

        let mut state = self.state();
        state.submitting = false;
        if result.is_ok() {
            state.stager.take_committed(snapshot.len());
            info!(
                "✓ 已提交 {} 项，暂存列表剩余 {} 项",
                snapshot.len(),
                state.stager.len()
            );
        }

        result
    }

    /// 当前阶段
    pub fn phase(&self) -> StagePhase {
        let state = self.state();
        if state.submitting {
            StagePhase::Submitting
        } else if state.stager.is_empty() {
            StagePhase::Empty
        } else {
            StagePhase::Staged
        }
    }

    /// 暂存列表快照
    pub fn staged(&self) -> Vec<PendingUpload> {
        self.state().stager.staged().to_vec()
    }

    /// 选择缓冲区中的文件数
    pub fn selection_len(&self) -> usize {
        self.state().stager.selection().len()
    }

    pub fn staged_len(&self) -> usize {
        self.state().stager.len()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // 中毒时继续使用内部状态
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 提交 future 中途被丢弃时清除 `submitting` 标记
struct SubmittingGuard<'a> {
    session: &'a DocumentSession,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        debug!("提交被中断，解除锁定");
        self.session.state().submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{RecordingStore, Reply};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    fn blob(name: &str) -> FileBlob {
        FileBlob::new(name, "application/pdf", name.as_bytes().to_vec())
    }

    fn session(store: Arc<RecordingStore>) -> DocumentSession {
        DocumentSession::new(CommitSubmitter::new(store))
    }

    /// 等待直到替身收到请求
    async fn wait_for_call(store: &RecordingStore) {
        while store.calls() == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_scenario_promote_commit_and_empty_commit() {
        let store = Arc::new(RecordingStore::new(Reply::Accept));
        let session = session(store.clone());
        assert_eq!(session.phase(), StagePhase::Empty);

        session.choose_files(vec![blob("a.pdf"), blob("b.pdf")]);
        session
            .promote(Some(Language::English), Some(DocumentType::Certificate))
            .unwrap();
        assert_eq!(session.staged_len(), 2);
        assert_eq!(session.selection_len(), 0);
        assert_eq!(session.phase(), StagePhase::Staged);

        session.choose_files(vec![blob("c.pdf")]);
        session
            .promote(Some(Language::Polish), Some(DocumentType::Other))
            .unwrap();
        let staged = session.staged();
        assert_eq!(staged.len(), 3);
        assert_eq!(staged[2].language(), Language::Polish);
        assert_eq!(staged[2].document_type(), DocumentType::Other);

        let outcome = session.commit().await.unwrap();
        assert_eq!(outcome.committed, 3);
        assert_eq!(session.staged_len(), 0);
        assert_eq!(session.phase(), StagePhase::Empty);

        let err = session.commit().await.unwrap_err();
        assert!(matches!(err, CommitError::Empty));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_promote_validation_error_is_reported() {
        let store = Arc::new(RecordingStore::new(Reply::Accept));
        let session = session(store);

        let err = session
            .promote(Some(Language::English), Some(DocumentType::Other))
            .unwrap_err();
        assert_eq!(
            err,
            StageError::Validation(crate::error::ValidationError::MissingFiles)
        );
        assert_eq!(session.phase(), StagePhase::Empty);
    }

    #[tokio::test]
    async fn test_failed_commit_returns_to_staged() {
        let store = Arc::new(RecordingStore::new(Reply::Reject(503)));
        let session = session(store.clone());
        session.choose_files(vec![blob("a.pdf"), blob("b.pdf")]);
        session
            .promote(Some(Language::German), Some(DocumentType::ComplianceCard))
            .unwrap();
        let before = session.staged();

        assert!(session.commit().await.is_err());

        assert_eq!(session.phase(), StagePhase::Staged);
        assert_eq!(session.staged(), before);
    }

    #[tokio::test]
    async fn test_second_commit_while_submitting_is_rejected() {
        let gate = Arc::new(Semaphore::new(0));
        let store = Arc::new(RecordingStore::gated(Reply::Accept, gate.clone()));
        let session = Arc::new(session(store.clone()));
        session.choose_files(vec![blob("a.pdf")]);
        session
            .promote(Some(Language::English), Some(DocumentType::Instruction))
            .unwrap();

        let in_flight = tokio::spawn({
            let session = session.clone();
            async move { session.commit().await }
        });
        wait_for_call(&store).await;
        assert_eq!(session.phase(), StagePhase::Submitting);

        // 重入提交被拒绝，不发请求
        let err = session.commit().await.unwrap_err();
        assert!(matches!(err, CommitError::AlreadySubmitting));
        // 按位置修改被锁定
        assert_eq!(session.remove(0).unwrap_err(), StageError::Locked);
        assert_eq!(
            session
                .reclassify(0, Language::Polish, DocumentType::Other)
                .unwrap_err(),
            StageError::Locked
        );
        // 追加仍然允许
        session.choose_files(vec![blob("late.pdf")]);
        session
            .promote(Some(Language::Polish), Some(DocumentType::Other))
            .unwrap();

        gate.add_permits(1);
        let outcome = in_flight.await.unwrap().unwrap();

        assert_eq!(outcome.committed, 1);
        assert_eq!(store.calls(), 1);
        // 提交期间追加的条目保留
        let staged = session.staged();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].file().name, "late.pdf");
        assert_eq!(session.phase(), StagePhase::Staged);
    }

    #[tokio::test]
    async fn test_dropped_commit_releases_guard() {
        let gate = Arc::new(Semaphore::new(0));
        let store = Arc::new(RecordingStore::gated(Reply::Accept, gate));
        let session = Arc::new(session(store.clone()));
        session.choose_files(vec![blob("a.pdf")]);
        session
            .promote(Some(Language::English), Some(DocumentType::Other))
            .unwrap();

        let in_flight = tokio::spawn({
            let session = session.clone();
            async move { session.commit().await }
        });
        wait_for_call(&store).await;
        in_flight.abort();
        let _ = in_flight.await;

        assert_eq!(session.phase(), StagePhase::Staged);
        assert_eq!(session.staged_len(), 1);
        assert!(session.remove(0).is_ok());
    }
}

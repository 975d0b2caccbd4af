//! 暂存服务 - 业务能力层
//!
//! 只负责本地暂存，不发网络请求

use tracing::debug;

use crate::error::{StageError, ValidationError};
use crate::models::{DocumentType, FileBlob, Language, PendingUpload};

/// 暂存器
///
/// 职责：
/// - 持有选择缓冲区（已选择、尚未分类的文件）
/// - 持有暂存列表（已分类、等待提交的条目，顺序即提交顺序）
/// - 不校验文件类型和大小（由选择器在输入边界处理）
#[derive(Debug, Default, Clone)]
pub struct DraftStager {
    selection: Vec<FileBlob>,
    staged: Vec<PendingUpload>,
}

impl DraftStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用新的选择替换选择缓冲区
    pub fn choose_files(&mut self, selection: Vec<FileBlob>) {
        debug!("选择了 {} 个文件", selection.len());
        self.selection = selection;
    }

    /// 将选择缓冲区中的文件按给定分类追加到暂存列表末尾
    ///
    /// 成功后清空选择缓冲区，返回追加的条目数。
    /// 前置条件不满足时不做任何修改。
    pub fn promote(
        &mut self,
        language: Option<Language>,
        document_type: Option<DocumentType>,
    ) -> Result<usize, ValidationError> {
        if self.selection.is_empty() {
            return Err(ValidationError::MissingFiles);
        }
        let language = language.ok_or(ValidationError::MissingLanguage)?;
        let document_type = document_type.ok_or(ValidationError::MissingDocumentType)?;

        let count = self.selection.len();
        self.staged.extend(
            self.selection
                .drain(..)
                .map(|file| PendingUpload::new(file, language, document_type)),
        );

        debug!(
            "暂存 {} 个文件 ({} / {})，暂存列表共 {} 项",
            count,
            language,
            document_type,
            self.staged.len()
        );
        Ok(count)
    }

    /// 按位置删除暂存条目
    pub fn remove(&mut self, index: usize) -> Result<PendingUpload, StageError> {
        self.check_index(index)?;
        Ok(self.staged.remove(index))
    }

    /// 按位置替换暂存条目的分类
    pub fn reclassify(
        &mut self,
        index: usize,
        language: Language,
        document_type: DocumentType,
    ) -> Result<(), StageError> {
        self.check_index(index)?;
        self.staged[index] = self.staged[index].reclassified(language, document_type);
        Ok(())
    }

    /// 移除已提交的前 `count` 项
    pub fn take_committed(&mut self, count: usize) -> Vec<PendingUpload> {
        let count = count.min(self.staged.len());
        self.staged.drain(..count).collect()
    }

    /// 清空暂存列表
    pub fn clear_staged(&mut self) {
        self.staged.clear();
    }

    pub fn selection(&self) -> &[FileBlob] {
        &self.selection
    }

    pub fn staged(&self) -> &[PendingUpload] {
        &self.staged
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), StageError> {
        if index >= self.staged.len() {
            return Err(StageError::IndexOutOfRange {
                index,
                len: self.staged.len(),
            });
        }
        Ok(())
    }
}

//! 待上传文件
//!
//! `FileBlob` 是选择器读出来的原始文件，`PendingUpload` 是带有分类信息、
//! 已进入暂存列表的条目。

use bytes::Bytes;

use crate::models::{DocumentType, Language};

/// 原始文件（名称 + MIME 类型 + 内容）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// 文件大小（字节）
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// 暂存条目
///
/// 创建后不可修改；重新分类会生成新的条目替换原位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    file: FileBlob,
    language: Language,
    document_type: DocumentType,
}

impl PendingUpload {
    pub fn new(file: FileBlob, language: Language, document_type: DocumentType) -> Self {
        Self {
            file,
            language,
            document_type,
        }
    }

    pub fn file(&self) -> &FileBlob {
        &self.file
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// 以新的分类生成条目，文件内容共享
    pub fn reclassified(&self, language: Language, document_type: DocumentType) -> Self {
        Self::new(self.file.clone(), language, document_type)
    }
}

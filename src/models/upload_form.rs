//! 提交表单
//!
//! 一次提交只发一个 multipart 请求。每个暂存条目按顺序展开成三个同级字段：
//!
//! ```text
//! files        (文件部分，带原始文件名和 MIME 类型)
//! language     (文本，如 "EN")
//! documentType (文本，如 "certificate")
//! ```
//!
//! 元数据不嵌套在文件部分里，服务端按位置对应文件和分类。

use crate::models::{FileBlob, PendingUpload};

/// 文件字段名
pub const FILES_FIELD: &str = "files";
/// 语言字段名
pub const LANGUAGE_FIELD: &str = "language";
/// 文档类型字段名
pub const DOCUMENT_TYPE_FIELD: &str = "documentType";

/// 表单字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    File { name: &'static str, file: FileBlob },
    Text { name: &'static str, value: String },
}

/// 与传输方式无关的表单描述
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    fields: Vec<FormField>,
}

impl UploadForm {
    /// 按暂存顺序构建表单
    pub fn from_entries(entries: &[PendingUpload]) -> Self {
        let mut fields = Vec::with_capacity(entries.len() * 3);
        for entry in entries {
            fields.push(FormField::File {
                name: FILES_FIELD,
                file: entry.file().clone(),
            });
            fields.push(FormField::Text {
                name: LANGUAGE_FIELD,
                value: entry.language().code().to_string(),
            });
            fields.push(FormField::Text {
                name: DOCUMENT_TYPE_FIELD,
                value: entry.document_type().tag().to_string(),
            });
        }
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FormField> {
        self.fields
    }

    /// 表单中的文件数量
    pub fn file_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| matches!(f, FormField::File { .. }))
            .count()
    }
}

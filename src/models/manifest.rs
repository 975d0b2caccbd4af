use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{DocumentType, Language};

/// 文档清单
///
/// 对应一次完整的暂存会话：每个 `batch` 是一次"选择文件 + 暂存"，
/// 全部暂存后统一提交。
///
/// ```toml
/// product_id = "prod_01"
///
/// [[batch]]
/// language = "EN"
/// document_type = "certificate"
/// files = ["ce.pdf", "ce_annex.pdf"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentManifest {
    /// 商品ID（仅用于日志）
    #[serde(default)]
    pub product_id: Option<String>,

    #[serde(default, rename = "batch")]
    pub batches: Vec<ManifestBatch>,

    /// 清单文件路径（加载时设置）
    #[serde(skip)]
    pub file_path: Option<String>,
}

/// 一次选择 + 暂存
///
/// 分类字段在文件里是可选的，缺失时在暂存阶段报校验错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestBatch {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub document_type: Option<DocumentType>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl DocumentManifest {
    /// 显示用名称
    pub fn display_name(&self) -> String {
        match (&self.product_id, &self.file_path) {
            (Some(id), _) => id.clone(),
            (None, Some(path)) => Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone()),
            (None, None) => "<未命名>".to_string(),
        }
    }

    /// 清单中的文件总数
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(|b| b.files.len()).sum()
    }

    /// 解析批次中的文件路径；相对路径以清单所在目录为基准
    pub fn resolve_files(&self, batch: &ManifestBatch) -> Vec<PathBuf> {
        let base = self
            .file_path
            .as_deref()
            .and_then(|p| Path::new(p).parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        batch
            .files
            .iter()
            .map(|f| {
                let path = Path::new(f);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base.join(path)
                }
            })
            .collect()
    }
}

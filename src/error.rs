//! 错误类型
//!
//! 库内部的错误全部是具体类型；编排层（orchestrator）统一用 `anyhow` 汇总。

use thiserror::Error;

/// 装箱的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 暂存校验错误
///
/// promote 前置条件不满足时返回，不会修改任何状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 没有选择文件
    #[error("请选择文件")]
    MissingFiles,
    /// 没有选择语言
    #[error("请选择语言")]
    MissingLanguage,
    /// 没有选择文档类型
    #[error("请选择文档类型")]
    MissingDocumentType,
}

/// 暂存列表操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 位置超出暂存列表范围
    #[error("位置 {index} 超出暂存列表范围 (共 {len} 项)")]
    IndexOutOfRange { index: usize, len: usize },
    /// 提交进行中，暂存列表不允许按位置修改
    #[error("提交进行中，暂存列表已锁定")]
    Locked,
}

/// 文件存储服务错误
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// 网络请求失败
    #[error("文件存储请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },
    /// 服务端返回非成功状态
    #[error("文件存储拒绝请求 ({endpoint}): {status} {reason}")]
    Rejected {
        endpoint: String,
        status: u16,
        reason: String,
    },
    /// 响应体无法解析为 JSON
    #[error("文件存储响应无法解析 ({endpoint}): {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: BoxError,
    },
}

/// 提交错误
#[derive(Debug, Error)]
pub enum CommitError {
    /// 暂存列表为空，没有发起网络请求
    #[error("没有待保存的文件")]
    Empty,
    /// 已有提交正在进行中，没有发起网络请求
    #[error("已有提交正在进行中")]
    AlreadySubmitting,
    #[error(transparent)]
    Store(#[from] FileStoreError),
}

impl CommitError {
    /// 暂存列表保持不变，可以原样重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommitError::Store(_))
    }
}

/// 文件选择错误
#[derive(Debug, Error)]
pub enum PickError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文件类型不在接受列表中
    #[error("文件类型不被接受 ({path}): {mime_type}")]
    NotAccepted { path: String, mime_type: String },
}

/// accept 列表配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的文件类型规则: '{pattern}' (应为 image/*、application/pdf 或 .pdf 形式)")]
pub struct AcceptError {
    pub pattern: String,
}

/// 分类值解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知的{kind}: '{value}'")]
pub struct ParseClassificationError {
    pub kind: &'static str,
    pub value: String,
}

// ========== 便捷构造函数 ==========

impl FileStoreError {
    /// 创建网络请求失败错误
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FileStoreError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建响应解析失败错误
    pub fn malformed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FileStoreError::MalformedResponse {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

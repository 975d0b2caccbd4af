//! # Product Documents
//!
//! 为商品附加多语言、分类文档并上传到文件存储服务
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - `FilePicker`：读取文件、识别 MIME、按 accept 列表过滤
//! - `clients/` - `FileStore` trait 与 `HttpFileStore`：一次 multipart POST
//!
//! ### ② 业务能力层（Services）
//! - `DraftStager` - 选择缓冲区 + 暂存列表，不接触网络
//! - `CommitSubmitter` - 把暂存列表一次性提交，成功后清空
//! - `FailureWriter` - 写失败记录
//!
//! ### ③ 流程层（Workflow）
//! - `DocumentSession` - 一个组件实例：暂存状态机 + 显式的 Submitting 锁
//! - `SessionCtx` - 上下文封装（清单名称 + 索引）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量清单处理器，管理资源和并发
//! - `orchestrator/manifest_processor` - 单个清单处理器
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

pub use utils::logging as logger;

// 重新导出常用类型
pub use clients::{FileStore, HttpFileStore};
pub use config::Config;
pub use error::{
    AcceptError, CommitError, FileStoreError, ParseClassificationError, PickError, StageError,
    ValidationError,
};
pub use infrastructure::{AcceptFilter, FilePicker};
pub use models::{DocumentManifest, DocumentType, FileBlob, Language, PendingUpload, UploadForm};
pub use orchestrator::{process_manifest, App, ProcessingStats};
pub use services::{CommitOutcome, CommitSubmitter, DraftStager};
pub use workflow::{DocumentSession, SessionCtx, StagePhase};

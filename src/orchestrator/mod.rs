//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量清单处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载清单（Vec<DocumentManifest>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `manifest_processor` - 单个清单处理器
//! - 把一份清单回放成"选择 → 暂存 → 提交"的会话
//! - 归档已提交的清单，记录失败
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<DocumentManifest>)
//!     ↓
//! manifest_processor (处理单个清单)
//!     ↓
//! workflow::DocumentSession (暂存状态机 + Submitting 锁)
//!     ↓
//! services (能力层：暂存 / 提交 / 失败记录)
//!     ↓
//! infrastructure + clients (文件选择器、文件存储客户端)
//! ```

pub mod batch_processor;
pub mod manifest_processor;

pub use batch_processor::{App, ProcessingStats};
pub use manifest_processor::{process_manifest, StageStats};

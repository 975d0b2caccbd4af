//! 失败记录服务 - 业务能力层
//!
//! 只负责"写失败记录"能力，不关心流程。提交失败不会自动重试，
//! 操作员根据这份记录手动重新运行。

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 失败记录服务
pub struct FailureWriter {
    file_path: String,
}

impl FailureWriter {
    /// 使用指定文件路径创建
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `manifest`: 清单名称或路径
    /// - `pending`: 仍在暂存列表中的文件数
    /// - `reason`: 失败原因
    pub fn write(&self, manifest: &str, pending: usize, reason: &str) -> Result<()> {
        debug!("写入失败记录: 清单 {} | 待提交 {} 个文件", manifest, pending);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        let line = format!(
            "[{}] 清单 {} | 待提交 {} 个文件 | 原因: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            manifest,
            pending,
            reason
        );

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

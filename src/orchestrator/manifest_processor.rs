//! 单个清单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块把一份清单"回放"成一次完整的组件交互：
//!
//! 1. **选择文件**：逐批读取文件（经过 accept 过滤）
//! 2. **暂存**：按批次的语言和文档类型加入暂存列表，校验失败的批次跳过并记录
//! 3. **提交**：整个暂存列表一次性提交
//! 4. **收尾**：成功则归档清单，失败则写入失败记录，等待人工重试

use crate::clients::FileStore;
use crate::config::Config;
use crate::error::CommitError;
use crate::infrastructure::FilePicker;
use crate::models::{DocumentManifest, PendingUpload};
use crate::services::{CommitSubmitter, FailureWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::{DocumentSession, SessionCtx};
use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 暂存统计
#[derive(Debug, Default)]
pub struct StageStats {
    /// 成功暂存的批次
    pub staged_batches: usize,
    /// 被拒绝的批次（文件读取失败或校验失败）
    pub rejected_batches: usize,
}

/// 处理单个清单
///
/// # 返回
/// 全部批次暂存成功且提交成功时返回 `true`
pub async fn process_manifest(
    store: Arc<dyn FileStore>,
    picker: &FilePicker,
    manifest: DocumentManifest,
    manifest_index: usize,
    config: &Config,
) -> Result<bool> {
    let ctx = SessionCtx::new(manifest_index, manifest.display_name());
    let failure_writer = FailureWriter::new(config.failure_log_file.clone());
    let record_name = manifest
        .file_path
        .clone()
        .unwrap_or_else(|| ctx.manifest_name.clone());

    log_manifest_start(&ctx, manifest.batches.len(), manifest.file_count());

    let session = DocumentSession::new(CommitSubmitter::new(store));
    let mut stats = StageStats::default();

    // ========== 逐批选择 + 暂存 ==========
    for (index, batch) in manifest.batches.iter().enumerate() {
        let batch_index = index + 1;
        let paths = manifest.resolve_files(batch);

        let files = match picker.pick(&paths).await {
            Ok(files) => files,
            Err(e) => {
                error!("{} 批次 {} 选择文件失败: {}", ctx, batch_index, e);
                failure_writer.write(&record_name, 0, &format!("批次 {}: {}", batch_index, e))?;
                stats.rejected_batches += 1;
                continue;
            }
        };

        session.choose_files(files);
        match session.promote(batch.language, batch.document_type) {
            Ok(count) => {
                info!(
                    "{} ✓ 批次 {} 暂存 {} 个文件 ({} / {})",
                    ctx,
                    batch_index,
                    count,
                    batch.language.map(|l| l.label()).unwrap_or_default(),
                    batch.document_type.map(|t| t.label()).unwrap_or_default()
                );
                stats.staged_batches += 1;
            }
            Err(e) => {
                warn!("{} ⚠️ 批次 {} 未暂存: {}", ctx, batch_index, e);
                failure_writer.write(&record_name, 0, &format!("批次 {}: {}", batch_index, e))?;
                stats.rejected_batches += 1;
            }
        }
    }

    if config.verbose_logging {
        log_staged(&ctx, &session.staged());
    }

    // ========== 提交 ==========
    let committed = match session.commit().await {
        Ok(outcome) => {
            info!(
                "{} ✓ 提交成功 {} 个文件，确认: {}",
                ctx,
                outcome.committed,
                truncate_text(&outcome.confirmation.to_string(), 120)
            );
            if config.archive_committed {
                archive_manifest(manifest.file_path.as_deref(), &ctx)?;
            }
            true
        }
        Err(CommitError::Empty) => {
            warn!("{} ⚠️ 没有可提交的文件", ctx);
            failure_writer.write(&record_name, 0, &CommitError::Empty.to_string())?;
            false
        }
        Err(e) => {
            error!("{} ❌ 提交失败: {}", ctx, e);
            failure_writer.write(&record_name, session.staged_len(), &e.to_string())?;
            false
        }
    };

    log_manifest_complete(&ctx, &stats, committed);

    Ok(committed && stats.rejected_batches == 0)
}

/// 归档已提交的清单（追加 .done 后缀，不会再被扫描）
fn archive_manifest(file_path: Option<&str>, ctx: &SessionCtx) -> Result<()> {
    if let Some(file_path) = file_path {
        let archived = format!("{}.done", file_path);
        fs::rename(file_path, &archived)
            .with_context(|| format!("无法归档清单: {}", file_path))?;
        info!("{} 🗂️ 清单已归档: {}", ctx, archived);
    }
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_manifest_start(ctx: &SessionCtx, batches: usize, files: usize) {
    info!("\n{}", "─".repeat(60));
    info!("{} 开始处理: {} 个批次 / {} 个文件", ctx, batches, files);
}

fn log_staged(ctx: &SessionCtx, staged: &[PendingUpload]) {
    for (i, entry) in staged.iter().enumerate() {
        info!(
            "{}   {}. {} [{}] {} / {}",
            ctx,
            i + 1,
            entry.file().name,
            entry.file().mime_type,
            entry.language(),
            entry.document_type()
        );
    }
}

fn log_manifest_complete(ctx: &SessionCtx, stats: &StageStats, committed: bool) {
    info!(
        "{} 完成: 暂存批次 {} | 拒绝批次 {} | 提交 {}",
        ctx,
        stats.staged_batches,
        stats.rejected_batches,
        if committed { "成功" } else { "失败" }
    );
    info!("{}", "─".repeat(60));
}

//! 日志工具
//!
//! tracing 初始化、运行日志文件头，以及批量上传各阶段的横幅输出

use anyhow::{Context, Result};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 60;

/// 初始化 tracing 日志
///
/// 级别由 `RUST_LOG` 控制，默认 `info`；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 带标题的分隔横幅
fn banner(title: &str) {
    info!("\n{}", "=".repeat(RULE_WIDTH));
    info!("{}", title);
    info!("{}", "=".repeat(RULE_WIDTH));
}

/// 创建（覆盖）本次运行的日志文件
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let header = format!("# 文档上传运行记录\n# 开始时间: {}\n\n", now());
    fs::write(log_file_path, header)
        .with_context(|| format!("无法创建日志文件: {}", log_file_path))
}

/// 启动信息：上传地址、接受的文件类型、并发上限
pub fn log_startup(endpoint: &str, accepted: &str, max_concurrent: usize) {
    banner("🚀 文档批量上传");
    info!("🌐 上传地址   {}", endpoint);
    info!(
        "🗂️ 接受类型   {}",
        if accepted.trim().is_empty() { "不限" } else { accepted }
    );
    info!("📊 并发清单数 {}", max_concurrent);
}

pub fn log_manifests_loaded(total: usize, max_concurrent: usize) {
    info!(
        "✓ 待上传清单 {} 份，分 {} 组执行",
        total,
        total.div_ceil(max_concurrent.max(1))
    );
}

/// 一组清单开始
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!(
        "\n📦 [组 {}/{}] 清单 #{}..#{} (共 {})",
        batch_num, total_batches, start, end, total
    );
}

pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    let mark = if success == total { "✓" } else { "⚠️" };
    info!("{} [组 {}] 上传成功 {}/{}", mark, batch_num, success, total);
}

/// 运行结束汇总
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    log_file_path: &str,
    failure_log_path: &str,
) {
    banner(&format!("📊 上传汇总 ({})", now()));
    info!("清单总数 {} | ✅ 成功 {} | ❌ 失败 {}", total, success, failed);
    info!("运行日志: {}", log_file_path);
    if failed > 0 {
        info!("失败记录: {}（修正后重新运行即可重试）", failure_log_path);
    }
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

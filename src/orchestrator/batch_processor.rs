//! 批量清单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量清单的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建日志文件、文件存储客户端和文件选择器
//! 2. **批量加载**：扫描并加载所有待处理的清单（`Vec<DocumentManifest>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总所有清单的处理结果
//!
//! 每个清单对应一个独立的 `DocumentSession`，会话之间只共享 HTTP 客户端。

use crate::clients::{FileStore, HttpFileStore};
use crate::config::Config;
use crate::infrastructure::{AcceptFilter, FilePicker};
use crate::models::DocumentManifest;
use crate::orchestrator::manifest_processor;
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_manifests_loaded, log_startup,
    print_final_stats,
};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<dyn FileStore>,
    picker: FilePicker,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let store = Arc::new(HttpFileStore::from_config(&config));
        Self::with_store(config, store)
    }

    /// 使用指定的文件存储初始化应用
    ///
    /// accept 列表无法解析时直接报错，不会放行任意文件
    pub fn with_store(config: Config, store: Arc<dyn FileStore>) -> Result<Self> {
        let accept = AcceptFilter::parse(&config.accepted_file_types)
            .context("ACCEPTED_FILE_TYPES 配置无效")?;
        let picker = FilePicker::new(accept);

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(
            store.endpoint(),
            &config.accepted_file_types,
            config.max_concurrent_manifests,
        );

        Ok(Self {
            config,
            store,
            picker,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let manifests = self.load_manifests().await?;

        if manifests.is_empty() {
            warn!("⚠️ 没有找到待处理的清单，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_manifests_loaded(manifests.len(), self.config.max_concurrent_manifests);

        let stats = self.process_all_manifests(manifests).await?;

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
            &self.config.failure_log_file,
        );

        Ok(stats)
    }

    async fn load_manifests(&self) -> Result<Vec<DocumentManifest>> {
        info!("\n📁 正在扫描待处理的清单...");
        crate::models::load_all_manifests(&self.config.manifest_folder).await
    }

    /// 处理所有清单
    async fn process_all_manifests(
        &self,
        manifests: Vec<DocumentManifest>,
    ) -> Result<ProcessingStats> {
        let per_batch = self.config.max_concurrent_manifests.max(1);
        let semaphore = Arc::new(Semaphore::new(per_batch));
        let total = manifests.len();
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total).step_by(per_batch) {
            let batch_end = (batch_start + per_batch).min(total);
            let batch_num = batch_start / per_batch + 1;
            let total_batches = total.div_ceil(per_batch);

            log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

            let success = self
                .process_batch(&manifests[batch_start..batch_end], batch_start, semaphore.clone())
                .await?;

            stats.success += success;
            stats.failed += (batch_end - batch_start) - success;

            log_batch_complete(batch_num, success, batch_end - batch_start);
        }

        Ok(stats)
    }

    /// 处理单个批次，返回成功数量
    async fn process_batch(
        &self,
        batch: &[DocumentManifest],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<usize> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, manifest) in batch.iter().enumerate() {
            let manifest_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let store = self.store.clone();
            let picker = self.picker.clone();
            let config = self.config.clone();
            let manifest = manifest.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let result = manifest_processor::process_manifest(
                    store,
                    &picker,
                    manifest,
                    manifest_index,
                    &config,
                )
                .await;
                (manifest_index, result)
            }));
        }

        let mut success = 0;
        for joined in join_all(handles).await {
            match joined {
                Ok((_, Ok(true))) => success += 1,
                Ok((_, Ok(false))) => {}
                Ok((manifest_index, Err(e))) => {
                    error!("[清单 #{}] ❌ 处理过程中发生错误: {:#}", manifest_index, e);
                }
                Err(e) => {
                    error!("任务执行失败: {}", e);
                }
            }
        }

        Ok(success)
    }
}

use crate::models::manifest::DocumentManifest;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载文档清单
pub async fn load_manifest(toml_file_path: &Path) -> Result<DocumentManifest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取清单文件: {}", toml_file_path.display()))?;

    let mut manifest: DocumentManifest = toml::from_str(&content)
        .with_context(|| format!("无法解析清单文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    manifest.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(manifest)
}

/// 从文件夹中加载所有清单
///
/// 解析失败的文件只记录警告并跳过；返回结果按文件名排序
pub async fn load_all_manifests(folder_path: &str) -> Result<Vec<DocumentManifest>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut manifests = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_manifest(&path).await {
            Ok(manifest) => {
                tracing::info!(
                    "成功加载 {} 个批次 / {} 个文件",
                    manifest.batches.len(),
                    manifest.file_count()
                );
                manifests.push(manifest);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(manifests)
}

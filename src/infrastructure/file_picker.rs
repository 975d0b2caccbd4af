//! 文件选择器 - 基础设施层
//!
//! 输入边界：从磁盘读取文件、识别 MIME 类型、按 accept 列表过滤。
//! 暂存器不会再次校验文件类型。

use std::path::Path;

use bytes::Bytes;
use mime::Mime;
use tracing::debug;

use crate::error::{AcceptError, PickError};
use crate::models::FileBlob;

/// 无法识别时使用的类型
const FALLBACK_MIME: &str = "application/octet-stream";

/// accept 列表
///
/// 格式同 HTML `accept` 属性：`image/*`、`application/pdf`、`.pdf`，逗号分隔。
/// 空字符串表示不限制类型。
#[derive(Debug, Clone, Default)]
pub struct AcceptFilter {
    patterns: Vec<AcceptPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AcceptPattern {
    /// `image/*`
    AnySubtype(String),
    /// `application/pdf`
    Exact(String),
    /// `.pdf`
    Extension(String),
    /// `*/*`
    Any,
}

fn parse_pattern(raw: &str) -> Result<AcceptPattern, AcceptError> {
    let invalid = || AcceptError {
        pattern: raw.to_string(),
    };

    if let Some(ext) = raw.strip_prefix('.') {
        if ext.is_empty() || ext.contains(['.', '/']) {
            return Err(invalid());
        }
        return Ok(AcceptPattern::Extension(ext.to_ascii_lowercase()));
    }

    let mime: Mime = raw.parse().map_err(|_| invalid())?;
    let any_type = mime.type_() == mime::STAR;
    let any_subtype = mime.subtype() == mime::STAR;
    match (any_type, any_subtype) {
        (true, true) => Ok(AcceptPattern::Any),
        (true, false) => Err(invalid()),
        (false, true) => Ok(AcceptPattern::AnySubtype(mime.type_().as_str().to_string())),
        (false, false) => Ok(AcceptPattern::Exact(mime.essence_str().to_string())),
    }
}

impl AcceptFilter {
    /// 解析 accept 列表
    ///
    /// 任何一项无法识别都会报错，不会悄悄放宽成"接受任意文件"
    pub fn parse(spec: &str) -> Result<Self, AcceptError> {
        let patterns = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_pattern)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// 判断文件是否被接受
    pub fn accepts(&self, file_name: &str, mime_type: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let mime: Option<Mime> = mime_type.parse().ok();
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        self.patterns.iter().any(|pattern| match (pattern, &mime) {
            (AcceptPattern::AnySubtype(ty), Some(m)) => m.type_().as_str() == ty.as_str(),
            (AcceptPattern::Exact(essence), Some(m)) => m.essence_str() == essence.as_str(),
            (AcceptPattern::Extension(ext), _) => extension.as_deref() == Some(ext.as_str()),
            (AcceptPattern::Any, _) => true,
            _ => false,
        })
    }
}

/// 文件选择器
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    accept: AcceptFilter,
}

impl FilePicker {
    pub fn new(accept: AcceptFilter) -> Self {
        Self { accept }
    }

    /// 读取一组文件，任何一个失败或不被接受则整体失败
    pub async fn pick<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<FileBlob>, PickError> {
        let mut blobs = Vec::with_capacity(paths.len());
        for path in paths {
            blobs.push(self.pick_one(path.as_ref()).await?);
        }
        Ok(blobs)
    }

    async fn pick_one(&self, path: &Path) -> Result<FileBlob, PickError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| PickError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = detect_mime(path, &data);

        if !self.accept.accepts(&name, mime_type) {
            return Err(PickError::NotAccepted {
                path: path.display().to_string(),
                mime_type: mime_type.to_string(),
            });
        }

        debug!("选择文件: {} ({}, {} 字节)", name, mime_type, data.len());
        Ok(FileBlob::new(name, mime_type, Bytes::from(data)))
    }
}

/// 识别 MIME 类型
///
/// 先按文件头识别；识别不了的（SVG、纯文本等）按扩展名猜测
fn detect_mime(path: &Path, data: &[u8]) -> &'static str {
    infer::get(data)
        .map(|kind| kind.mime_type())
        .or_else(|| mime_guess::from_path(path).first_raw())
        .unwrap_or(FALLBACK_MIME)
}

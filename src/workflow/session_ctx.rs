//! 会话上下文
//!
//! 封装"我正在处理哪份清单、属于哪个商品"这一信息

use std::fmt::Display;

/// 会话上下文
#[derive(Debug, Clone)]
pub struct SessionCtx {
    /// 清单索引（仅用于日志显示，从1开始）
    pub manifest_index: usize,

    /// 清单名称（商品ID或文件名）
    pub manifest_name: String,
}

impl SessionCtx {
    pub fn new(manifest_index: usize, manifest_name: impl Into<String>) -> Self {
        Self {
            manifest_index,
            manifest_name: manifest_name.into(),
        }
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[清单 {} #{}]", self.manifest_name, self.manifest_index)
    }
}

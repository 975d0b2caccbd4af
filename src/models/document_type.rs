use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseClassificationError;

/// 文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// 使用说明书
    Instruction,
    /// 证书
    Certificate,
    /// 合规卡
    ComplianceCard,
    /// 产品目录卡
    CatalogCard,
    /// 其他
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Instruction,
        DocumentType::Certificate,
        DocumentType::ComplianceCard,
        DocumentType::CatalogCard,
        DocumentType::Other,
    ];

    /// 获取类型标签（即提交时的字段值）
    pub fn tag(self) -> &'static str {
        match self {
            DocumentType::Instruction => "instruction",
            DocumentType::Certificate => "certificate",
            DocumentType::ComplianceCard => "compliance_card",
            DocumentType::CatalogCard => "catalog_card",
            DocumentType::Other => "other",
        }
    }

    /// 获取显示名称
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Instruction => "Instruction",
            DocumentType::Certificate => "Certificate",
            DocumentType::ComplianceCard => "Compliance Card",
            DocumentType::CatalogCard => "Catalog Card",
            DocumentType::Other => "Other",
        }
    }
}

impl FromStr for DocumentType {
    type Err = ParseClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DocumentType::ALL
            .into_iter()
            .find(|ty| ty.tag() == s)
            .ok_or_else(|| ParseClassificationError {
                kind: "文档类型",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

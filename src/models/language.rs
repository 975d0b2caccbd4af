use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseClassificationError;

/// 文档语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// 波兰语
    #[serde(rename = "PL")]
    Polish,
    /// 英语
    #[serde(rename = "EN")]
    English,
    /// 德语
    #[serde(rename = "DE")]
    German,
}

impl Language {
    /// 全部可选语言（按选择器中的顺序）
    pub const ALL: [Language; 3] = [Language::Polish, Language::English, Language::German];

    /// 获取语言代码（即提交时的字段值）
    pub fn code(self) -> &'static str {
        match self {
            Language::Polish => "PL",
            Language::English => "EN",
            Language::German => "DE",
        }
    }

    /// 获取显示名称
    pub fn label(self) -> &'static str {
        match self {
            Language::Polish => "Polish (PL)",
            Language::English => "English (EN)",
            Language::German => "German (DE)",
        }
    }
}

impl FromStr for Language {
    type Err = ParseClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseClassificationError {
                kind: "语言",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

use serde::{Deserialize, Serialize};

/// 用户定义的变量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 一次替换的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    /// 替换后的文本，未找到的占位符保持原样
    pub result: String,

    /// 未找到的变量名，每出现一次记录一次
    pub missing: Vec<String>,
}

impl Substitution {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 合并多次替换中缺失的变量名，去重并保持首次出现的顺序
pub fn collect_missing<'a, I>(results: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Substitution>,
{
    let mut names: Vec<String> = Vec::new();
    for name in results.into_iter().flat_map(|s| s.missing.iter()) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

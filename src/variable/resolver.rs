use crate::variable::types::Substitution;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// 变量替换器
pub struct VariableResolver;

impl VariableResolver {
    fn placeholder_regex() -> &'static Regex {
        static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
        VAR_REGEX.get_or_init(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap())
    }

    /// 替换文本中的所有 {{name}} 占位符
    ///
    /// `lookup` 找不到的变量保持原样，并记录到 `missing`。
    /// 单次扫描完成，替换进来的值不会被再次展开。
    pub fn substitute<F>(text: &str, mut lookup: F) -> Substitution
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut missing = Vec::new();

        let result = Self::placeholder_regex()
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                match lookup(name) {
                    Some(value) => value,
                    None => {
                        missing.push(name.to_string());
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        Substitution { result, missing }
    }
}

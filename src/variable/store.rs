use crate::Result;
use crate::error::RestpadError;
use crate::storage::{KeyValueStore, VARIABLES_KEY};
use crate::variable::resolver::VariableResolver;
use crate::variable::types::{Substitution, Variable};
use std::sync::Arc;
use tracing::{debug, warn};

/// 用户变量集合
///
/// 初始化时从存储中读取一次；每次 `add`/`remove` 都把整个集合重新写回存储。
/// 写入失败只记录警告，不影响内存中的状态。
pub struct VariableStore {
    backend: Arc<dyn KeyValueStore>,
    variables: Vec<Variable>,
}

impl VariableStore {
    /// 从存储加载变量，存储不可用或内容损坏时视为空集合
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let variables = match backend.get(VARIABLES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Variable>>(&raw).unwrap_or_else(|e| {
                warn!("Stored variables are corrupted, starting empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored variables, starting empty: {}", e);
                Vec::new()
            }
        };

        debug!(count = variables.len(), "Variables loaded");
        Self { backend, variables }
    }

    /// 新增或更新变量
    ///
    /// 已存在的变量原地更新值，在 `list()` 中的位置不变。
    pub fn add(&mut self, variable: Variable) -> Result<()> {
        Self::validate_name(&variable.name)?;

        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => existing.value = variable.value,
            None => self.variables.push(variable),
        }

        self.persist();
        Ok(())
    }

    /// 删除变量，不存在时什么也不做
    pub fn remove(&mut self, name: &str) {
        let before = self.variables.len();
        self.variables.retain(|v| v.name != name);

        if self.variables.len() != before {
            self.persist();
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn list(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// 使用当前变量替换文本中的占位符
    pub fn substitute(&self, text: &str) -> Substitution {
        VariableResolver::substitute(text, |name| self.get(name).map(str::to_string))
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(RestpadError::MalformedInput(
                "Variable name must not be empty".to_string(),
            ));
        }
        // 含有 `}` 或 `{{` 的名字永远无法被占位符引用
        if name.contains('}') || name.contains("{{") {
            return Err(RestpadError::MalformedInput(format!(
                "Variable name must not contain placeholder delimiters: {}",
                name
            )));
        }
        Ok(())
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.variables)
            .map_err(RestpadError::from)
            .and_then(|json| self.backend.set(VARIABLES_KEY, &json));

        if let Err(e) = result {
            warn!("Failed to save variables: {}", e);
        }
    }
}

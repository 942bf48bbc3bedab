use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// EditableText 在快照中的键名
pub const TEXT_KEY: &str = "keyName";

/// 快照里允许出现的原语值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// 宿主在销毁/重建之间保留的键值快照 (SavedState)
///
/// 键不存在是合法状态（首次运行），读取方取默认值而不是报错。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedState {
    #[serde(default)]
    pub entries: HashMap<String, SavedValue>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_string(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), SavedValue::Str(value));
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(SavedValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// TOML文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    pub meta: StateMeta,
    #[serde(default)]
    pub state: SavedState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMeta {
    pub version: String,
    pub saved_at: DateTime<Local>,
}

impl StateFile {
    /// 用当前时刻包装一份快照，准备写盘
    pub fn wrap(state: SavedState) -> Self {
        Self {
            meta: StateMeta {
                version: "1.0".to_string(),
                saved_at: Local::now(),
            },
            state,
        }
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::wrap(SavedState::new())
    }
}

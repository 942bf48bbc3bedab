//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::exit_gate::{Clock, SystemClock};
use crate::lifecycle::Screen;
use crate::logging::LogBuffer;
use crate::models::SavedState;

/// 提示条（toast）的展示时长，毫秒
pub const TOAST_DURATION_MS: u64 = 2_000;

/// 短暂展示、到期自动消失的提示
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub deadline_ms: u64,
}

/// 应用状态
pub struct App {
    pub screen: Screen,
    pub saved: SavedState, // 宿主保留的最近一次快照
    pub clock: Box<dyn Clock>,
    pub logs: LogBuffer,
    pub toast: Option<Toast>,
    pub recreations: u32, // 配置变更触发的重建次数
}

impl App {
    /// 创建新的应用实例
    pub fn new(screen: Screen, saved: SavedState, logs: LogBuffer) -> Self {
        Self {
            screen,
            saved,
            clock: Box::new(SystemClock::new()),
            logs,
            toast: None,
            recreations: 0,
        }
    }

    /// 当前仍在展示的提示文本
    pub fn active_toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.text.as_str())
    }
}

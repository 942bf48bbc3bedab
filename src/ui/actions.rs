//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 返回信号 (Esc)，经退出确认门决定提示/吸收/退出
    Back,
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}

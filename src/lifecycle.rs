//! 屏幕生命周期处理器
//!
//! 把宿主（终端事件循环）下发的生命周期转换建模成一个显式状态对象：
//! create → start → resume → (交互期) → pause → stop → destroy，
//! stop 之后可经 restart → start 回到前台；配置变更（终端 resize）
//! 触发销毁重建，重建时 restore_state 发生在 start 和 resume 之间。
//! 每次转换恰好记录一条日志，除此之外无副作用。

use tracing::{debug, info};

use crate::exit_gate::{BackSignal, ExitGate};
use crate::models::{SavedState, TEXT_KEY};

/// 屏幕所处的生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Created => "created",
            Stage::Started => "started",
            Stage::Resumed => "resumed",
            Stage::Paused => "paused",
            Stage::Stopped => "stopped",
            Stage::Destroyed => "destroyed",
        }
    }
}

/// 单屏应用的屏幕状态
///
/// 持有唯一一份用户可编辑文本 (EditableText) 和退出确认门。
/// 钩子的调用顺序由宿主保证，这里不做校验，也不缓冲重排。
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// 用户可编辑文本，仅由直接编辑修改
    pub text: String,
    pub gate: ExitGate,
    stage: Stage,
}

impl Screen {
    /// 初始化屏幕。宿主在屏幕可见之前调用，大部分初始化工作放这里
    pub fn on_create() -> Self {
        info!(target: "lifecycle", "on_create");
        Self {
            text: String::new(),
            gate: ExitGate::new(),
            stage: Stage::Created,
        }
    }

    /// 屏幕进入可见阶段。stop 里释放的东西在这里重新拿起来
    pub fn on_start(&mut self) {
        info!(target: "lifecycle", "on_start");
        self.stage = Stage::Started;
    }

    /// 屏幕获得焦点，用户开始交互
    pub fn on_resume(&mut self) {
        info!(target: "lifecycle", "on_resume");
        self.stage = Stage::Resumed;
    }

    /// 焦点丢失。耗时的释放操作不要放这里，宿主对钩子有响应时限
    pub fn on_pause(&mut self) {
        info!(target: "lifecycle", "on_pause");
        self.stage = Stage::Paused;
    }

    /// 屏幕不再可见
    pub fn on_stop(&mut self) {
        info!(target: "lifecycle", "on_stop");
        self.stage = Stage::Stopped;
    }

    /// 从 stopped 回到前台，随后宿主会再调用 on_start
    pub fn on_restart(&mut self) {
        info!(target: "lifecycle", "on_restart");
    }

    /// 屏幕即将被回收
    pub fn on_destroy(&mut self) {
        info!(target: "lifecycle", "on_destroy");
        self.stage = Stage::Destroyed;
    }

    /// 把 EditableText 写进快照，键为 `"keyName"`
    ///
    /// 宿主在 on_stop 之后、on_destroy 之前调用，且仅在预期可能
    /// 重建时调用。必须立即返回，不做耗时工作。
    pub fn on_save_state(&self, out: &mut SavedState) {
        out.put_string(TEXT_KEY, self.text.clone());
        info!(target: "lifecycle", "on_save_state");
    }

    /// 重建后、可交互之前，从快照恢复 EditableText
    ///
    /// 键不存在时保持默认值，这是首次运行的正常情形，不是错误。
    pub fn on_restore_state(&mut self, state: &SavedState) {
        if let Some(text) = state.get_string(TEXT_KEY) {
            self.text = text.to_string();
        }
        info!(target: "lifecycle", "on_restore_state");
    }

    /// 配置变更通知（终端 resize 对应旋转/字号/分屏等场景）
    pub fn on_configuration_changed(&mut self, cols: u16, rows: u16) {
        info!(target: "lifecycle", cols, rows, "on_configuration_changed");
    }

    /// 返回信号经过退出确认门，由调用方注入当前单调时刻
    pub fn on_back_signal(&mut self, now_ms: u64) -> BackSignal {
        let outcome = self.gate.signal(now_ms);
        info!(target: "lifecycle", outcome = ?outcome, "on_back_signal");
        outcome
    }

    /// 用户每次触碰屏幕都会进来，只在 DEBUG 级别记录，避免刷屏
    pub fn on_user_interaction(&self) {
        debug!(target: "lifecycle", "on_user_interaction");
    }

    /// 菜单关闭，纯委托，无附加效果
    #[allow(dead_code)]
    pub fn on_menu_closed(&self) {}

    /// 菜单项选择，委托宿主默认处理（未消费）
    #[allow(dead_code)]
    pub fn on_option_selected(&self, _item: u32) -> bool {
        false
    }

    /// 子屏幕返回结果，纯委托，无附加效果
    #[allow(dead_code)]
    pub fn on_activity_result(&self, _request: i32, _result: i32) {}

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

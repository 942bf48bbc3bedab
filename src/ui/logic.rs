//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和宿主侧的生命周期序列

use tracing::info;

use super::actions::Action;
use super::state::{App, TOAST_DURATION_MS, Toast};
use crate::exit_gate::BackSignal;
use crate::lifecycle::Screen;
use crate::models::SavedState;

impl App {
    /// 核心逻辑分发，返回 true 表示请求退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Back => {
                let now = self.clock.now_ms();
                match self.screen.on_back_signal(now) {
                    BackSignal::Prompt => {
                        self.show_toast("确定要退出吗？10 秒后再按一次 Esc 退出");
                    }
                    BackSignal::Absorbed => {} // 连击，静默吸收
                    BackSignal::Exit => return true,
                }
            }

            Action::Input(c) => self.screen.text.push(c),

            Action::DeleteChar => {
                self.screen.text.pop();
            }
        }
        false
    }

    // ============ 提示条相关 ============

    /// 弹出到期自动消失的提示
    pub fn show_toast(&mut self, text: &str) {
        self.toast = Some(Toast {
            text: text.to_string(),
            deadline_ms: self.clock.now_ms() + TOAST_DURATION_MS,
        });
    }

    /// 每轮事件循环调用一次，清理过期的提示
    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast {
            if self.clock.now_ms() >= toast.deadline_ms {
                self.toast = None;
            }
        }
    }

    // ============ 宿主侧生命周期序列 ============

    /// 配置变更（终端 resize）：通知后走完整的销毁重建循环，
    /// EditableText 经快照穿越 destroy/create
    pub fn recreate_after_config_change(&mut self, cols: u16, rows: u16) {
        info!(target: "host", cols, rows, "configuration change, recreating screen");

        self.screen.on_configuration_changed(cols, rows);
        self.screen.on_pause();
        self.screen.on_stop();

        let mut state = SavedState::new();
        self.screen.on_save_state(&mut state);
        self.screen.on_destroy();

        let mut screen = Screen::on_create();
        screen.on_start();
        screen.on_restore_state(&state);
        screen.on_resume();

        self.screen = screen;
        self.saved = state;
        self.recreations += 1;
    }

    /// 有序停机：保存快照后销毁屏幕，返回快照交给宿主落盘
    pub fn teardown(&mut self) -> SavedState {
        self.screen.on_pause();
        self.screen.on_stop();

        let mut state = SavedState::new();
        self.screen.on_save_state(&mut state);
        self.screen.on_destroy();

        self.saved = state.clone();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_gate::Clock;
    use crate::logging::LogBuffer;
    use crate::models::TEXT_KEY;
    use std::cell::Cell;
    use std::rc::Rc;

    /// 手动推进的测试时钟
    struct FakeClock {
        now: Rc<Cell<u64>>,
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.now.get()
        }
    }

    fn test_app() -> (App, Rc<Cell<u64>>) {
        let now = Rc::new(Cell::new(0));
        let mut app = App::new(Screen::on_create(), SavedState::new(), LogBuffer::new());
        app.clock = Box::new(FakeClock { now: now.clone() });
        app.screen.on_start();
        app.screen.on_resume();
        (app, now)
    }

    #[test]
    fn test_input_edits_text() {
        let (mut app, _) = test_app();
        assert!(!app.dispatch(Action::Input('a')));
        app.dispatch(Action::Input('b'));
        app.dispatch(Action::DeleteChar);
        assert_eq!(app.screen.text, "a");
    }

    #[test]
    fn test_first_back_prompts_not_quits() {
        let (mut app, _) = test_app();
        assert!(!app.dispatch(Action::Back));
        assert!(app.active_toast().is_some());
    }

    #[test]
    fn test_rapid_second_back_absorbed() {
        let (mut app, now) = test_app();
        app.dispatch(Action::Back);
        now.set(500);
        assert!(!app.dispatch(Action::Back));
    }

    #[test]
    fn test_slow_second_back_quits() {
        let (mut app, now) = test_app();
        app.dispatch(Action::Back);
        now.set(15_000);
        assert!(app.dispatch(Action::Back));
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let (mut app, now) = test_app();
        app.dispatch(Action::Back);
        assert!(app.active_toast().is_some());

        now.set(TOAST_DURATION_MS);
        app.tick();
        assert!(app.active_toast().is_none());
    }

    #[test]
    fn test_recreate_carries_text_across() {
        let (mut app, _) = test_app();
        app.screen.text = "çevir beni".to_string();

        app.recreate_after_config_change(120, 40);

        assert_eq!(app.screen.text, "çevir beni");
        assert_eq!(app.saved.get_string(TEXT_KEY), Some("çevir beni"));
        assert_eq!(app.recreations, 1);
    }

    #[test]
    fn test_teardown_snapshots_text() {
        let (mut app, _) = test_app();
        app.screen.text = "elveda".to_string();

        let state = app.teardown();
        assert_eq!(state.get_string(TEXT_KEY), Some("elveda"));
    }
}

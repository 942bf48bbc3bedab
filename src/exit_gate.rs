//! 退出确认门 (Exit Gate)
//!
//! 防止误触返回键直接退出应用：第一次返回信号只弹出提示，
//! 窗口期内的连击被吸收，窗口期外的第二次信号才真正退出。
//! 状态机是纯函数式的，时钟通过 Clock trait 注入，方便单元测试。

use std::time::Instant;

/// 确认窗口时长（毫秒）
pub const CONFIRM_WINDOW_MS: u64 = 10_000;

/// 单调时钟抽象
pub trait Clock {
    /// 返回单调递增的毫秒读数
    fn now_ms(&self) -> u64;
}

/// 基于 `Instant` 的真实时钟，从进程启动开始计时
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// 门的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// 武装：下一次信号弹出提示，不退出
    Armed,
    /// 提示已弹出，等待窗口期外的第二次信号
    PendingConfirm,
}

/// 返回信号的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackSignal {
    /// 弹出"确定退出？"提示
    Prompt,
    /// 窗口期内的连击，静默吸收
    Absorbed,
    /// 委托给宿主默认的返回行为（退出）
    Exit,
}

/// 退出确认门
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitGate {
    state: GateState,
    /// 上一次信号的时间戳；None 表示从未收到过信号
    last_signal_ms: Option<u64>,
}

impl ExitGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Armed,
            last_signal_ms: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// 纯转移函数：输入当前时刻，返回新的门状态和处理结果
    ///
    /// 连击吸收分支会重新武装并提前返回，不更新时间戳，
    /// 与源行为保持一致（见 DESIGN.md 中的记录）。
    pub fn step(self, now_ms: u64) -> (ExitGate, BackSignal) {
        if let Some(last) = self.last_signal_ms {
            if now_ms.saturating_sub(last) < CONFIRM_WINDOW_MS {
                let gate = ExitGate {
                    state: GateState::Armed,
                    last_signal_ms: self.last_signal_ms,
                };
                return (gate, BackSignal::Absorbed);
            }
        }

        let mut gate = ExitGate {
            state: self.state,
            last_signal_ms: Some(now_ms),
        };

        match gate.state {
            GateState::Armed => {
                gate.state = GateState::PendingConfirm;
                (gate, BackSignal::Prompt)
            }
            GateState::PendingConfirm => (gate, BackSignal::Exit),
        }
    }

    /// 就地转移的便捷包装
    pub fn signal(&mut self, now_ms: u64) -> BackSignal {
        let (next, outcome) = self.step(now_ms);
        *self = next;
        outcome
    }
}

impl Default for ExitGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// 手动推进的测试时钟
    struct FakeClock {
        now: Cell<u64>,
    }

    impl FakeClock {
        fn at(ms: u64) -> Self {
            Self { now: Cell::new(ms) }
        }

        fn advance(&self, ms: u64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.now.get()
        }
    }

    #[test]
    fn test_first_signal_prompts() {
        let mut gate = ExitGate::new();
        assert_eq!(gate.signal(0), BackSignal::Prompt);
        assert_eq!(gate.state(), GateState::PendingConfirm);
    }

    #[test]
    fn test_first_signal_prompts_with_large_clock() {
        // 时间戳未设置时不触发连击吸收，即使时钟读数小于窗口
        let mut gate = ExitGate::new();
        assert_eq!(gate.signal(9_999), BackSignal::Prompt);
    }

    #[test]
    fn test_rapid_double_signal_absorbed() {
        let clock = FakeClock::at(0);
        let mut gate = ExitGate::new();

        assert_eq!(gate.signal(clock.now_ms()), BackSignal::Prompt);

        clock.advance(500);
        assert_eq!(gate.signal(clock.now_ms()), BackSignal::Absorbed);
        // 吸收后重新武装
        assert_eq!(gate.state(), GateState::Armed);
    }

    #[test]
    fn test_absorb_keeps_timestamp() {
        let mut gate = ExitGate::new();
        gate.signal(0);
        gate.signal(500);
        // 时间戳仍是 0，窗口期内的第三次连击同样被吸收
        assert_eq!(gate.signal(9_000), BackSignal::Absorbed);
    }

    #[test]
    fn test_slow_double_signal_exits() {
        let clock = FakeClock::at(0);
        let mut gate = ExitGate::new();

        assert_eq!(gate.signal(clock.now_ms()), BackSignal::Prompt);

        clock.advance(15_000);
        assert_eq!(gate.signal(clock.now_ms()), BackSignal::Exit);
    }

    #[test]
    fn test_absorbed_then_window_expires_prompts_again() {
        let mut gate = ExitGate::new();
        gate.signal(0); // Prompt
        gate.signal(500); // Absorbed，重新武装
        assert_eq!(gate.signal(12_000), BackSignal::Prompt);
    }

    #[test]
    fn test_step_is_pure() {
        let gate = ExitGate::new();
        let (after, outcome) = gate.step(100);
        assert_eq!(outcome, BackSignal::Prompt);
        // 原值不变
        assert_eq!(gate.state(), GateState::Armed);
        assert_eq!(after.state(), GateState::PendingConfirm);
    }
}

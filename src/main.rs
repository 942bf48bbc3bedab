mod exit_gate;
mod lifecycle;
mod logging;
mod models;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::lifecycle::{Screen, Stage};
use crate::logging::{JournalLayer, LogBuffer};
use crate::storage::{load_state, save_state};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/chrysalis/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("chrysalis");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 初始化日志：文件 appender + 屏幕日志面板的内存 layer
///
/// 返回的 guard 要持有到进程结束，保证日志刷盘
fn init_tracing(
    data_dir: &Path,
    buffer: LogBuffer,
) -> io::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "chrysalis.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chrysalis=debug,lifecycle=debug,host=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(JournalLayer::new(buffer))
        .init();

    Ok(guard)
}

fn main() -> io::Result<()> {
    // 数据文件路径 (~/.local/share/chrysalis/state.toml)
    let data_dir = get_data_dir()?;
    let data_path = data_dir.join("state.toml");

    let logs = LogBuffer::new();
    let _guard = init_tracing(&data_dir, logs.clone())?;

    // 加载上次停机时落盘的快照（宿主保留的 bundle）
    let saved = load_state(&data_path)?;

    // 启动序列：create → start → (restore) → resume
    let mut screen = Screen::on_create();
    screen.on_start();
    if !saved.is_empty() {
        screen.on_restore_state(&saved);
    }
    screen.on_resume();

    let mut app = App::new(screen, saved, logs);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_host(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    // 停机序列：pause → stop → save_state → destroy，快照落盘
    let state = app.teardown();
    save_state(&state, &data_path)?;
    println!("快照已保存到 {}", data_path.display());

    result
}

/// 宿主事件循环：把终端事件翻译成生命周期转换下发给屏幕
fn run_host(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 带超时轮询，提示条到期后也能及时消失
        if !event::poll(Duration::from_millis(250))? {
            app.tick();
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
            // 终端 resize 即配置变更，走销毁重建
            Event::Resize(cols, rows) => app.recreate_after_config_change(cols, rows),
            Event::FocusLost => app.screen.on_pause(),
            Event::FocusGained => match app.screen.stage() {
                Stage::Paused => app.screen.on_resume(),
                Stage::Stopped => {
                    app.screen.on_restart();
                    app.screen.on_start();
                    app.screen.on_resume();
                }
                _ => {}
            },
            _ => {}
        }

        app.tick();
    }
    Ok(())
}

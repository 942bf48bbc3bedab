//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::state::App;
use crate::lifecycle::Stage;
use crate::models::TEXT_KEY;
use components::render_text_field;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题 + 当前阶段
            Constraint::Length(3), // 可编辑文本
            Constraint::Min(8),    // 生命周期日志
            Constraint::Length(4), // 快照详情
            Constraint::Length(3), // 帮助 + 提示
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_editor(frame, app, chunks[1]);
    render_journal(frame, app, chunks[2]);
    render_snapshot(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "🦋 Chrysalis 生命周期演示",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   阶段: "),
        Span::styled(
            app.screen.stage().as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let widget = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    // 只有 resumed 阶段屏幕才接收输入
    let focused = app.screen.stage() == Stage::Resumed;
    render_text_field(frame, area, "输入 (EditableText)", &app.screen.text, focused);
}

fn render_journal(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.logs.get_all();
    let visible = area.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| {
            let line = Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S%.3f ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("[{}] ", entry.target),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(entry.message.clone()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let journal = List::new(items).block(
        Block::default()
            .title("生命周期日志")
            .borders(Borders::ALL),
    );
    frame.render_widget(journal, area);
}

fn render_snapshot(frame: &mut Frame, app: &App, area: Rect) {
    let value = app
        .saved
        .get_string(TEXT_KEY)
        .map(|s| format!("\"{}\"", s))
        .unwrap_or_else(|| "(无)".to_string());
    let content = format!(
        "最近快照 {} = {}\n重建次数: {}  （调整终端大小触发配置变更重建）",
        TEXT_KEY, value, app.recreations
    );

    let snapshot = Paragraph::new(content)
        .block(Block::default().title("SavedState").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(snapshot, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = "[字符] 输入  [Backspace] 删除  [Esc] 返回信号（两次确认退出）";

    let (text, style) = match app.active_toast() {
        Some(toast) => (
            format!("{}  |  {}", help_text, toast),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => (help_text.to_string(), Style::default().fg(Color::Gray)),
    };

    let help = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

//! 通用 UI 组件
//!
//! 文本输入框等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// [组件] 单行文本框，聚焦时在尾部画一条模拟光标
///
/// 文本只在尾部编辑，光标不需要独立定位
pub fn render_text_field(frame: &mut Frame, area: Rect, title: &str, text: &str, is_focused: bool) {
    let (value, style) = if is_focused {
        (
            format!("{}▏", text),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (text.to_string(), Style::default().fg(Color::Gray))
    };

    let input = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

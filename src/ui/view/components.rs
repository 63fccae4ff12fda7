//! 通用 UI 组件
//!
//! 输入框、卡片等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::card::{Card, DownloadControl, PLACEHOLDER_TEXT};
use crate::models::{Item, ItemType};

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

fn placeholder_line() -> Line<'static> {
    Line::from(Span::styled(
        PLACEHOLDER_TEXT,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn download_span(download: &DownloadControl) -> Span<'static> {
    match download {
        DownloadControl::Available { href } => Span::styled(
            format!("[{}] {}", download.label(), href),
            Style::default().fg(Color::Green),
        ),
        DownloadControl::ComingSoon => Span::styled(
            format!("[{}]", download.label()),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ),
    }
}

fn icon_span(icon_src: &str) -> Span<'static> {
    if icon_src.is_empty() {
        Span::raw("   ")
    } else {
        Span::styled(format!("🖼 {icon_src}"), Style::default().fg(Color::DarkGray))
    }
}

/// [组件] 列表卡片的文本行
pub fn card_lines(item: &Item) -> Vec<Line<'static>> {
    let card = match Card::from_item(item) {
        Card::Placeholder => return vec![placeholder_line(), Line::default()],
        Card::Published(card) => card,
    };

    let tag = match item.kind {
        ItemType::Game => "game",
        ItemType::App => "app",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                card.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  [{tag}]  "), Style::default().fg(Color::Gray)),
            icon_span(&card.icon_src),
        ]),
        Line::from(card.description.clone()),
        Line::from(Span::styled(
            format!("Size: {} | Time: {}", card.size, card.time),
            Style::default().fg(Color::Gray),
        )),
    ];

    if !card.screenshots.is_empty() {
        lines.push(Line::from(format!(
            "Screenshots: {}",
            card.screenshots.join(", ")
        )));
    }
    if !card.videos.is_empty() {
        lines.push(Line::from(format!("Videos: {}", card.videos.join(", "))));
    }

    lines.push(Line::from(download_span(&card.download)));
    lines.push(Line::default());
    lines
}

/// [组件] 轮播卡片：图标、名称和下载按钮
pub fn carousel_lines(item: &Item) -> Vec<Line<'static>> {
    match Card::from_item(item) {
        Card::Placeholder => vec![placeholder_line()],
        Card::Published(card) => vec![
            Line::from(icon_span(&card.icon_src)),
            Line::from(Span::styled(
                card.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(download_span(&card.download)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_placeholder_lines() {
        let item = Item::new("Ghost", ItemType::Game);
        assert_eq!(text(&card_lines(&item))[0], "Not Published Yet");
        assert_eq!(text(&carousel_lines(&item)), vec!["Not Published Yet"]);
    }

    #[test]
    fn test_published_lines() {
        let mut item = Item::new("Maps", ItemType::App);
        item.icon = Some("maps.svg".into());
        item.description = Some("Find places".into());
        item.videos = vec!["tour.mp4".into()];
        item.download = Some("https://dl.example/maps".into());

        let lines = text(&card_lines(&item));
        assert_eq!(lines[0].trim_end(), "Maps  [app]");
        assert_eq!(lines[1], "Find places");
        assert_eq!(lines[2], "Size: N/A | Time: N/A");
        assert_eq!(lines[3], "Videos: tour.mp4");
        assert_eq!(lines[4], "[Download] https://dl.example/maps");
        assert!(!lines.iter().any(|l| l.starts_with("Screenshots")));
    }
}

//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

use super::state::{App, AppMode, ViewSource};
use crate::models::{CAROUSEL_SIZE, Category};
use components::{card_lines, carousel_lines, render_input_widget};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 搜索/分类/排序
            Constraint::Length(5), // 轮播
            Constraint::Min(8),    // 列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_controls(frame, app, chunks[1]);
    render_carousel(frame, app, chunks[2]);
    render_list(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🛍 App Shelf")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
        ])
        .split(area);

    let searching = app.mode == AppMode::Searching;
    let title = if app.listening { "搜索 🎤" } else { "搜索" };
    render_input_widget(frame, chunks[0], title, &app.search, searching, Color::Yellow);
    if searching {
        let x = chunks[0].x + 1 + app.search.chars().count() as u16;
        frame.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
    }

    let titles = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {}", i + 1, c.label()));
    let selected = Category::ALL
        .iter()
        .position(|c| *c == app.category)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().title("分类").borders(Borders::ALL));
    frame.render_widget(tabs, chunks[1]);

    let sort = Paragraph::new(app.sort.label())
        .block(Block::default().title("排序 [s]").borders(Borders::ALL));
    frame.render_widget(sort, chunks[2]);
}

fn render_carousel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title("热门应用").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, CAROUSEL_SIZE as u32); CAROUSEL_SIZE])
        .split(inner);

    for (item, column) in app.carousel.iter().zip(columns.iter()) {
        frame.render_widget(Paragraph::new(carousel_lines(item)), *column);
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .display_list
        .iter()
        .map(|item| ListItem::new(card_lines(item)))
        .collect();

    let title = match &app.source {
        _ if !app.catalog_loaded => "加载中…".to_string(),
        ViewSource::All => format!("全部 ({})", items.len()),
        ViewSource::Search(query) => format!("搜索 \"{}\" ({})", query, items.len()),
        ViewSource::Category(c) => format!("{} ({})", c.label(), items.len()),
        ViewSource::Sorted(order) => format!("按 {} 排序 ({})", order.label(), items.len()),
    };

    let empty = items.is_empty();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[/] 搜索  [1-5/Tab] 分类  [s] 排序  [v] 语音  [j/k] 滚动  [g] 顶部  [q] 退出"
        }
        AppMode::Searching => "输入关键字实时搜索  [Enter/Esc] 完成",
    };

    let message = app.message.as_deref().unwrap_or("");
    let line = if message.is_empty() {
        Line::from(help_text)
    } else {
        Line::from(vec![
            Span::raw(help_text),
            Span::raw("  |  "),
            Span::styled(message.to_string(), Style::default().fg(Color::Yellow)),
        ])
    };

    let help = Paragraph::new(line)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};
use crate::models::Category;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char('v') => Some(Action::StartVoiceSearch),
            KeyCode::Tab => Some(Action::NextCategory),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                Some(Action::SelectCategory(Category::ALL[idx]))
            }
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Esc | KeyCode::Enter => Some(Action::LeaveSearch),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(&app.mode, key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}

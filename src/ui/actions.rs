//! Action 枚举定义 (Intent)
//!
//! 用户交互和后台任务结果都转化为明确的语义化 Action

use crate::models::{Catalog, Category, TrendingSet};

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    ScrollToTop,

    // 搜索框
    FocusSearch,
    LeaveSearch,
    Input(char), // 输入字符
    DeleteChar,  // Backspace

    // 分类与排序
    SelectCategory(Category),
    NextCategory,
    CycleSort,

    StartVoiceSearch,

    // 后台任务结果
    CatalogLoaded(Catalog),
    TrendingLoaded(TrendingSet),
    LoadFailed(String),
    VoiceResult(String),
    VoiceFailed(String),
}

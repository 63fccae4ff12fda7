//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::sync::Arc;
use std::sync::mpsc::Sender;

use super::actions::Action;
use crate::html::PageView;
use crate::models::{Catalog, Category, Item, SortOrder, TrendingSet};
use crate::speech::SpeechRecognizer;

/// 应用状态
pub struct App {
    pub catalog: Catalog,
    pub trending: TrendingSet,
    pub carousel: Vec<Item>,
    pub display_list: Vec<Item>,
    /// 当前列表的来源，搜索、分类、排序互斥，最后一次操作生效
    pub source: ViewSource,
    /// 高亮的分类按钮
    pub category: Category,
    /// 排序下拉框的当前值
    pub sort: SortOrder,
    pub search: String,
    pub selected_index: usize,
    pub mode: AppMode,
    pub catalog_loaded: bool,
    pub voice: Option<VoiceInput>,
    pub listening: bool,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Searching,
}

/// 显示列表的派生方式
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSource {
    All,
    Search(String),
    Category(Category),
    Sorted(SortOrder),
}

/// 语音输入所需的资源
pub struct VoiceInput {
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub locale: String,
    pub tx: Sender<Action>,
}

impl App {
    /// 创建新的应用实例，数据随后由加载任务送达
    pub fn new(voice: Option<VoiceInput>) -> Self {
        Self {
            catalog: Catalog::default(),
            trending: TrendingSet::default(),
            carousel: Vec::new(),
            display_list: Vec::new(),
            source: ViewSource::All,
            category: Category::All,
            sort: SortOrder::default(),
            search: String::new(),
            selected_index: 0,
            mode: AppMode::Normal,
            catalog_loaded: false,
            voice,
            listening: false,
            message: Some("正在加载目录…".to_string()),
        }
    }

    /// 替换显示列表并回到顶部
    pub fn show(&mut self, source: ViewSource, items: Vec<Item>) {
        tracing::debug!(?source, count = items.len(), "刷新列表");
        self.source = source;
        self.display_list = items;
        self.selected_index = 0;
    }

    /// 获取当前选中的条目
    #[allow(dead_code)]
    pub fn selected_item(&self) -> Option<&Item> {
        self.display_list.get(self.selected_index)
    }

    pub fn page_view(&self) -> PageView<'_> {
        PageView {
            carousel: &self.carousel,
            items: &self.display_list,
            search: &self.search,
            category: self.category,
            sort: self.sort,
        }
    }
}

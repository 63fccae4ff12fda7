//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑。搜索、分类和排序都从完整目录重新派生列表，
//! 互相覆盖，不做组合

use std::sync::Arc;

use super::actions::Action;
use super::state::{App, AppMode, ViewSource};
use crate::models::{Catalog, Category, SortOrder, TrendingSet};
use crate::tasks;

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::ScrollToTop => self.scroll_to_top(),

            Action::FocusSearch => {
                self.mode = AppMode::Searching;
                self.message = None;
            }
            Action::LeaveSearch => self.mode = AppMode::Normal,
            Action::Input(c) => {
                if self.mode == AppMode::Searching {
                    let mut query = self.search.clone();
                    query.push(c);
                    self.apply_search(query);
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Searching {
                    let mut query = self.search.clone();
                    query.pop();
                    self.apply_search(query);
                }
            }

            Action::SelectCategory(category) => self.select_category(category),
            Action::NextCategory => self.select_category(self.category.next()),
            Action::CycleSort => self.apply_sort(self.sort.next()),

            Action::StartVoiceSearch => self.start_voice_search(),

            Action::CatalogLoaded(catalog) => self.on_catalog_loaded(catalog),
            Action::TrendingLoaded(trending) => self.on_trending_loaded(trending),
            Action::LoadFailed(error) => self.message = Some(error),
            Action::VoiceResult(transcript) => {
                self.listening = false;
                self.mode = AppMode::Normal;
                self.apply_search(transcript);
            }
            Action::VoiceFailed(error) => {
                self.listening = false;
                self.message = Some(error);
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.display_list.len() {
            self.selected_index += 1;
        }
    }

    /// 回到顶部
    pub fn scroll_to_top(&mut self) {
        self.selected_index = 0;
    }

    // ============ 列表派生 ============

    /// 在完整目录中搜索，与手动输入和语音输入共用
    pub fn apply_search(&mut self, query: String) {
        let items = self.catalog.search(&query);
        self.search = query.clone();
        self.show(ViewSource::Search(query), items);
    }

    /// 切换分类，丢弃搜索词
    pub fn select_category(&mut self, category: Category) {
        self.category = category;
        self.search.clear();
        let items = self.catalog.filter(category, &self.trending);
        self.show(ViewSource::Category(category), items);
    }

    /// 切换排序，丢弃搜索词和分类过滤
    pub fn apply_sort(&mut self, order: SortOrder) {
        self.sort = order;
        self.search.clear();
        let items = self.catalog.sorted(order);
        self.show(ViewSource::Sorted(order), items);
    }

    // ============ 后台任务结果 ============

    fn on_catalog_loaded(&mut self, catalog: Catalog) {
        self.carousel = catalog.carousel();
        let items = catalog.all();
        self.message = Some(format!(
            "已加载 {} 个游戏、{} 个应用",
            catalog.games().len(),
            catalog.apps().len()
        ));
        self.catalog = catalog;
        self.catalog_loaded = true;
        self.search.clear();
        self.show(ViewSource::All, items);
    }

    /// 只更新名单，当前列表保持不变
    fn on_trending_loaded(&mut self, trending: TrendingSet) {
        if trending.is_empty() {
            tracing::warn!("热门名单为空");
        }
        self.trending = trending;
    }

    // ============ 语音搜索 ============

    pub fn start_voice_search(&mut self) {
        if self.listening {
            return;
        }
        let Some(voice) = &self.voice else {
            self.message = Some("语音搜索不可用：未配置识别命令".to_string());
            return;
        };
        tasks::spawn_voice_capture(
            Arc::clone(&voice.recognizer),
            voice.locale.clone(),
            voice.tx.clone(),
        );
        self.listening = true;
        self.message = Some(format!("正在聆听 ({})…", voice.locale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, ItemType};
    use crate::speech::{SpeechError, SpeechRecognizer};
    use crate::ui::state::VoiceInput;
    use std::sync::mpsc;
    use std::time::Duration;

    fn item(name: &str, kind: ItemType) -> Item {
        Item::new(name, kind)
    }

    fn loaded_app() -> App {
        let mut chess = item("Chess", ItemType::Game);
        chess.size = Some("2GB".into());
        chess.recommended = true;
        let mut racer = item("Racer", ItemType::Game);
        racer.size = Some("10MB".into());
        racer.keywords = vec!["cars".into()];
        let apps = (1..=7)
            .map(|i| {
                let mut app = item(&format!("App {i}"), ItemType::App);
                app.size = Some(format!("{i}KB"));
                app
            })
            .collect();

        let mut app = App::new(None);
        app.dispatch(Action::CatalogLoaded(Catalog::new(vec![chess, racer], apps)));
        app
    }

    fn names(app: &App) -> Vec<&str> {
        app.display_list.iter().map(|i| i.name.as_str()).collect()
    }

    struct FixedRecognizer(&'static str);

    impl SpeechRecognizer for FixedRecognizer {
        fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
            assert_eq!(locale, "en-US");
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_catalog_load_fills_carousel_and_list() {
        let app = loaded_app();
        assert!(app.catalog_loaded);
        assert_eq!(app.carousel.len(), 5);
        assert_eq!(app.carousel[0].name, "App 1");
        assert_eq!(app.display_list.len(), 9);
        assert_eq!(names(&app)[..2], ["Chess", "Racer"]);
        assert_eq!(app.source, ViewSource::All);
    }

    #[test]
    fn test_typing_runs_search() {
        let mut app = loaded_app();
        app.dispatch(Action::FocusSearch);
        for c in "CAR".chars() {
            app.dispatch(Action::Input(c));
        }
        assert_eq!(app.search, "CAR");
        assert_eq!(names(&app), vec!["Racer"]);

        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::DeleteChar);
        assert_eq!(app.display_list.len(), 9);
        assert_eq!(app.source, ViewSource::Search(String::new()));
    }

    #[test]
    fn test_input_ignored_outside_search_mode() {
        let mut app = loaded_app();
        app.dispatch(Action::Input('x'));
        assert!(app.search.is_empty());
        assert_eq!(app.display_list.len(), 9);
    }

    #[test]
    fn test_category_discards_search() {
        let mut app = loaded_app();
        app.dispatch(Action::FocusSearch);
        app.dispatch(Action::Input('z'));
        assert!(app.display_list.is_empty());
        app.dispatch(Action::LeaveSearch);

        app.dispatch(Action::SelectCategory(Category::Games));
        assert!(app.search.is_empty());
        assert_eq!(names(&app), vec!["Chess", "Racer"]);

        app.dispatch(Action::SelectCategory(Category::Recommended));
        assert_eq!(names(&app), vec!["Chess"]);
    }

    #[test]
    fn test_trending_before_load_is_empty() {
        let mut app = loaded_app();
        app.dispatch(Action::SelectCategory(Category::Trending));
        assert!(app.display_list.is_empty());

        app.dispatch(Action::TrendingLoaded(TrendingSet::from_text("Racer\nApp 3\n")));
        // 名单到达不会改变当前列表
        assert!(app.display_list.is_empty());

        app.dispatch(Action::SelectCategory(Category::Trending));
        assert_eq!(names(&app), vec!["Racer", "App 3"]);
    }

    #[test]
    fn test_sort_discards_filter_and_search() {
        let mut app = loaded_app();
        app.dispatch(Action::SelectCategory(Category::Games));
        app.dispatch(Action::CycleSort);
        assert_eq!(app.sort, SortOrder::TimeAsc);
        assert_eq!(app.display_list.len(), 9);

        app.dispatch(Action::CycleSort);
        assert_eq!(app.source, ViewSource::Sorted(SortOrder::SizeAsc));
        assert_eq!(names(&app).first(), Some(&"App 1"));
        assert_eq!(names(&app).last(), Some(&"Chess"));
        // 分类按钮保持高亮
        assert_eq!(app.category, Category::Games);
    }

    #[test]
    fn test_navigation_and_scroll_to_top() {
        let mut app = loaded_app();
        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.selected_index, 0);
        for _ in 0..20 {
            app.dispatch(Action::MoveSelectionDown);
        }
        assert_eq!(app.selected_index, 8);
        assert_eq!(app.selected_item().map(|i| i.name.as_str()), Some("App 7"));
        app.dispatch(Action::ScrollToTop);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_voice_without_recognizer_reports_unavailable() {
        let mut app = loaded_app();
        app.dispatch(Action::StartVoiceSearch);
        assert!(!app.listening);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_voice_result_runs_search() {
        let (tx, rx) = mpsc::channel();
        let mut app = loaded_app();
        app.voice = Some(VoiceInput {
            recognizer: Arc::new(FixedRecognizer("chess")),
            locale: "en-US".to_string(),
            tx,
        });

        app.dispatch(Action::StartVoiceSearch);
        assert!(app.listening);

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(action, Action::VoiceResult("chess".to_string()));
        app.dispatch(action);
        assert!(!app.listening);
        assert_eq!(app.search, "chess");
        assert_eq!(names(&app), vec!["Chess"]);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(None);
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::ScrollToTop));
    }
}

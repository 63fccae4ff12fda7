use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 轮播区展示的应用数量
pub const CAROUSEL_SIZE: usize = 5;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Game,
    #[default]
    App,
}

/// 目录条目（游戏或应用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Item {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// 加载时由来源列表决定，忽略 JSON 中的值
    #[serde(rename = "type", skip_deserializing)]
    pub kind: ItemType,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub screenshots: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub videos: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub recommended: bool,
}

/// null 与缺省字段一样按默认值处理
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    #[allow(dead_code)]
    pub fn new(name: impl Into<String>, kind: ItemType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// 同时具有非空图标和描述才算已发布
    pub fn is_published(&self) -> bool {
        non_empty(&self.icon).is_some() && non_empty(&self.description).is_some()
    }

    /// `term` 须已转为小写
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(term))
    }

    pub fn size_value(&self) -> f64 {
        parse_size(self.size.as_deref())
    }

    pub fn time_value(&self) -> Option<NaiveDateTime> {
        parse_time(self.time.as_deref())
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// 分类过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Games,
    Apps,
    Trending,
    Recommended,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Games,
        Category::Apps,
        Category::Trending,
        Category::Recommended,
    ];

    /// 对应页面按钮上的 `data-filter` 值
    pub fn as_filter(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Games => "games",
            Category::Apps => "apps",
            Category::Trending => "trending",
            Category::Recommended => "recommended",
        }
    }

    pub fn from_filter(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_filter() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Games => "Games",
            Category::Apps => "Apps",
            Category::Trending => "Trending",
            Category::Recommended => "Recommended",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    TimeDesc,
    TimeAsc,
    SizeAsc,
    SizeDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::TimeDesc,
        SortOrder::TimeAsc,
        SortOrder::SizeAsc,
        SortOrder::SizeDesc,
    ];

    /// 对应 `sort-select` 的取值
    pub fn as_value(self) -> &'static str {
        match self {
            SortOrder::TimeDesc => "time-desc",
            SortOrder::TimeAsc => "time-asc",
            SortOrder::SizeAsc => "size-asc",
            SortOrder::SizeDesc => "size-desc",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::TimeDesc => "Newest",
            SortOrder::TimeAsc => "Oldest",
            SortOrder::SizeAsc => "Smallest",
            SortOrder::SizeDesc => "Largest",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortOrder::TimeAsc => a.time_value().cmp(&b.time_value()),
            SortOrder::TimeDesc => b.time_value().cmp(&a.time_value()),
            SortOrder::SizeAsc => a.size_value().total_cmp(&b.size_value()),
            SortOrder::SizeDesc => b.size_value().total_cmp(&a.size_value()),
        }
    }
}

/// 热门名单，仅做成员判断
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingSet {
    names: HashSet<String>,
}

impl TrendingSet {
    /// 每行一个名称，去除首尾空白，忽略空行
    pub fn from_text(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// 目录：游戏与应用两个有序列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    games: Vec<Item>,
    apps: Vec<Item>,
}

impl Catalog {
    /// 按来源列表重新标记类型
    pub fn new(games: Vec<Item>, apps: Vec<Item>) -> Self {
        let tag = |items: Vec<Item>, kind: ItemType| {
            items
                .into_iter()
                .map(|item| Item { kind, ..item })
                .collect::<Vec<_>>()
        };
        Self {
            games: tag(games, ItemType::Game),
            apps: tag(apps, ItemType::App),
        }
    }

    pub fn games(&self) -> &[Item] {
        &self.games
    }

    pub fn apps(&self) -> &[Item] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.games.len() + self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 全部条目，游戏在前
    pub fn all(&self) -> Vec<Item> {
        self.games.iter().chain(&self.apps).cloned().collect()
    }

    /// 轮播区：前 5 个应用
    pub fn carousel(&self) -> Vec<Item> {
        self.apps.iter().take(CAROUSEL_SIZE).cloned().collect()
    }

    /// 名称或关键字包含查询词（不区分大小写），空查询匹配全部
    pub fn search(&self, query: &str) -> Vec<Item> {
        let term = query.to_lowercase();
        self.games
            .iter()
            .chain(&self.apps)
            .filter(|item| item.matches(&term))
            .cloned()
            .collect()
    }

    pub fn filter(&self, category: Category, trending: &TrendingSet) -> Vec<Item> {
        match category {
            Category::All => self.all(),
            Category::Games => self.games.clone(),
            Category::Apps => self.apps.clone(),
            Category::Trending => self
                .games
                .iter()
                .chain(&self.apps)
                .filter(|item| trending.contains(&item.name))
                .cloned()
                .collect(),
            Category::Recommended => self
                .games
                .iter()
                .chain(&self.apps)
                .filter(|item| item.recommended)
                .cloned()
                .collect(),
        }
    }

    /// 稳定排序，不修改源列表
    pub fn sorted(&self, order: SortOrder) -> Vec<Item> {
        let mut items = self.all();
        items.sort_by(|a, b| order.compare(a, b));
        items
    }
}

/// 解析 "150MB" 这类大小字符串，以 MB 为基准单位
pub fn parse_size(size: Option<&str>) -> f64 {
    let Some(size) = size.filter(|s| !s.is_empty()) else {
        return 0.0;
    };
    let Some(num) = leading_number(size) else {
        return 0.0;
    };
    let lower = size.to_lowercase();
    if lower.contains("kb") {
        num / 1024.0
    } else if lower.contains("mb") {
        num
    } else if lower.contains("gb") {
        num * 1024.0
    } else {
        num
    }
}

/// 取字符串开头的数值：可选空白、符号、整数、小数和指数部分
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 解析发布时间，无法识别时返回 None
pub fn parse_time(time: Option<&str>) -> Option<NaiveDateTime> {
    let time = time?.trim();
    if time.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
    {
        return Some(dt);
    }
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(time, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{time}-01"), "%Y-%m-%d").ok())
        .or_else(|| {
            if time.len() == 4 && time.bytes().all(|b| b.is_ascii_digit()) {
                NaiveDate::from_ymd_opt(time.parse().ok()?, 1, 1)
            } else {
                None
            }
        })?;
    date.and_hms_opt(0, 0, 0)
}

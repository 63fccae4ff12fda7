//! 卡片模型
//!
//! 把条目映射为卡片上实际显示的内容，终端视图和 HTML 导出共用

use crate::models::{Item, non_empty};

pub const PLACEHOLDER_TEXT: &str = "Not Published Yet";
pub const MISSING_FIELD: &str = "N/A";

/// 下载按钮
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadControl {
    Available { href: String },
    ComingSoon,
}

impl DownloadControl {
    fn from_item(item: &Item) -> Self {
        match item.download.as_deref() {
            Some(href) if !href.trim().is_empty() => DownloadControl::Available {
                href: href.to_string(),
            },
            _ => DownloadControl::ComingSoon,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadControl::Available { .. } => "Download",
            DownloadControl::ComingSoon => "Coming Soon",
        }
    }

    pub fn href(&self) -> &str {
        match self {
            DownloadControl::Available { href } => href,
            DownloadControl::ComingSoon => "#",
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, DownloadControl::ComingSoon)
    }
}

/// 已发布条目的卡片内容
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedCard {
    /// 非 .png/.jpg 结尾时为空
    pub icon_src: String,
    pub name: String,
    pub description: String,
    pub size: String,
    pub time: String,
    pub screenshots: Vec<String>,
    pub videos: Vec<String>,
    pub download: DownloadControl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Placeholder,
    Published(PublishedCard),
}

impl Card {
    pub fn from_item(item: &Item) -> Self {
        if !item.is_published() {
            return Card::Placeholder;
        }
        let icon = item.icon.as_deref().unwrap_or_default();
        let icon_src = if icon.ends_with(".png") || icon.ends_with(".jpg") {
            icon.to_string()
        } else {
            String::new()
        };
        Card::Published(PublishedCard {
            icon_src,
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            size: non_empty(&item.size).unwrap_or(MISSING_FIELD).to_string(),
            time: non_empty(&item.time).unwrap_or(MISSING_FIELD).to_string(),
            screenshots: item.screenshots.clone(),
            videos: item.videos.clone(),
            download: DownloadControl::from_item(item),
        })
    }
}

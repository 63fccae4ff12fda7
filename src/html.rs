//! HTML 导出
//!
//! 用结构化的节点树生成页面，所有文本和属性值在输出时统一转义

use std::fmt::{self, Write};

use crate::card::{Card, DownloadControl, PLACEHOLDER_TEXT, PublishedCard};
use crate::models::{Category, Item, SortOrder};

/// 不需要闭合标签的元素
const VOID_TAGS: [&str; 4] = ["img", "input", "source", "meta"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => f.write_str(&escape(text)),
            Node::Element(el) => {
                write!(f, "<{}", el.tag)?;
                for (name, value) in &el.attrs {
                    write!(f, " {}=\"{}\"", name, escape(value))?;
                }
                f.write_char('>')?;
                if VOID_TAGS.contains(&el.tag) {
                    return Ok(());
                }
                for child in &el.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", el.tag)
            }
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder() -> Node {
    Element::new("div")
        .attr("class", "placeholder")
        .text(PLACEHOLDER_TEXT)
        .into()
}

fn download_link(download: &DownloadControl) -> Node {
    let class = if download.is_disabled() { "disabled" } else { "" };
    Element::new("a")
        .attr("href", download.href())
        .attr("class", class)
        .text(download.label())
        .into()
}

fn icon(card: &PublishedCard) -> Node {
    Element::new("img")
        .attr("src", card.icon_src.as_str())
        .attr("alt", card.name.as_str())
        .into()
}

/// 列表卡片
pub fn card_node(item: &Item) -> Node {
    let card = match Card::from_item(item) {
        Card::Placeholder => return placeholder(),
        Card::Published(card) => card,
    };

    let mut el = Element::new("div")
        .attr("class", "item-card")
        .child(icon(&card))
        .child(Element::new("h3").text(card.name.as_str()))
        .child(Element::new("p").text(card.description.as_str()))
        .child(Element::new("p").text(format!("Size: {} | Time: {}", card.size, card.time)));

    if !card.screenshots.is_empty() {
        let shots = card.screenshots.iter().map(|src| {
            Node::from(
                Element::new("img")
                    .attr("src", src.as_str())
                    .attr("width", "80")
                    .attr("height", "80"),
            )
        });
        el = el.child(Element::new("div").attr("class", "screenshots").children(shots));
    }

    if !card.videos.is_empty() {
        let videos = card.videos.iter().map(|src| {
            let source = Element::new("source")
                .attr("src", src.as_str())
                .attr("type", "video/mp4");
            Node::from(
                Element::new("video")
                    .attr("controls", "")
                    .attr("width", "200")
                    .child(source),
            )
        });
        el = el.child(Element::new("div").attr("class", "videos").children(videos));
    }

    el.child(download_link(&card.download)).into()
}

/// 轮播卡片只显示图标、名称和下载按钮
pub fn carousel_card_node(item: &Item) -> Node {
    match Card::from_item(item) {
        Card::Placeholder => placeholder(),
        Card::Published(card) => Element::new("div")
            .attr("class", "item-card")
            .attr("style", "width: 180px")
            .child(icon(&card))
            .child(Element::new("h4").text(card.name.as_str()))
            .child(download_link(&card.download))
            .into(),
    }
}

pub fn carousel_node(items: &[Item]) -> Node {
    Element::new("div")
        .attr("id", "carousel")
        .children(items.iter().map(carousel_card_node))
        .into()
}

pub fn list_node(items: &[Item]) -> Node {
    Element::new("div")
        .attr("id", "item-list")
        .children(items.iter().map(card_node))
        .into()
}

/// 生成整页所需的视图数据
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub carousel: &'a [Item],
    pub items: &'a [Item],
    pub search: &'a str,
    pub category: Category,
    pub sort: SortOrder,
}

fn controls(view: &PageView) -> Node {
    let search = Element::new("input")
        .attr("type", "text")
        .attr("id", "search")
        .attr("placeholder", "Search apps and games")
        .attr("value", view.search);

    let speak = Element::new("button").attr("id", "speak-btn").text("🎤");

    let options = SortOrder::ALL.into_iter().map(|order| {
        let mut option = Element::new("option").attr("value", order.as_value());
        if order == view.sort {
            option = option.attr("selected", "");
        }
        Node::from(option.text(order.label()))
    });
    let sort = Element::new("select").attr("id", "sort-select").children(options);

    let buttons = Category::ALL.into_iter().map(|category| {
        let class = if category == view.category { "active" } else { "" };
        Node::from(
            Element::new("button")
                .attr("data-filter", category.as_filter())
                .attr("class", class)
                .text(category.label()),
        )
    });
    let categories = Element::new("div")
        .attr("class", "category-buttons")
        .children(buttons);

    Element::new("div")
        .attr("class", "controls")
        .child(search)
        .child(speak)
        .child(sort)
        .child(categories)
        .into()
}

pub fn page(view: &PageView) -> Node {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").text("App Shelf"));

    let body = Element::new("body")
        .child(controls(view))
        .child(Element::new("h2").text("Top Apps"))
        .child(carousel_node(view.carousel))
        .child(list_node(view.items))
        .child(Element::new("button").attr("id", "back-btn").text("↑ Top"));

    Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body)
        .into()
}

pub fn render_page(view: &PageView) -> String {
    format!("<!DOCTYPE html>\n{}\n", page(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;

    fn published(name: &str) -> Item {
        let mut item = Item::new(name, ItemType::Game);
        item.icon = Some("icon.png".into());
        item.description = Some("Fun".into());
        item
    }

    #[test]
    fn test_escape_text_and_attributes() {
        let node: Node = Element::new("p")
            .attr("title", "a\"b'<c>")
            .text("x & <script>")
            .into();
        assert_eq!(
            node.to_string(),
            "<p title=\"a&quot;b&#39;&lt;c&gt;\">x &amp; &lt;script&gt;</p>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = Element::new("img").attr("src", "a.png").into();
        assert_eq!(node.to_string(), "<img src=\"a.png\">");
    }

    #[test]
    fn test_placeholder_card() {
        let item = Item::new("<b>Secret</b>", ItemType::App);
        assert_eq!(
            card_node(&item).to_string(),
            "<div class=\"placeholder\">Not Published Yet</div>"
        );
    }

    #[test]
    fn test_card_escapes_item_fields() {
        let mut item = published("<img src=x onerror=alert(1)>");
        item.description = Some("Tom & Jerry".into());
        let html = card_node(&item).to_string();
        assert!(html.contains("<h3>&lt;img src=x onerror=alert(1)&gt;</h3>"));
        assert!(html.contains("<p>Tom &amp; Jerry</p>"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn test_card_optional_sections() {
        let mut item = published("Game");
        let html = card_node(&item).to_string();
        assert!(!html.contains("screenshots"));
        assert!(!html.contains("videos"));
        assert!(html.contains("Size: N/A | Time: N/A"));
        assert!(html.contains("<a href=\"#\" class=\"disabled\">Coming Soon</a>"));

        item.screenshots = vec!["s1.png".into()];
        item.videos = vec!["v.mp4".into()];
        item.download = Some("https://dl.example/game".into());
        let html = card_node(&item).to_string();
        assert!(html.contains("<div class=\"screenshots\"><img src=\"s1.png\" width=\"80\" height=\"80\"></div>"));
        assert!(html.contains("<source src=\"v.mp4\" type=\"video/mp4\">"));
        assert!(html.contains("<a href=\"https://dl.example/game\" class=\"\">Download</a>"));
    }

    #[test]
    fn test_carousel_card_has_no_description() {
        let html = carousel_card_node(&published("Tiny")).to_string();
        assert!(html.contains("<h4>Tiny</h4>"));
        assert!(!html.contains("Fun"));
    }

    #[test]
    fn test_page_marks_active_controls() {
        let items = vec![published("One")];
        let view = PageView {
            carousel: &[],
            items: &items,
            search: "\"q\"",
            category: Category::Trending,
            sort: SortOrder::SizeAsc,
        };
        let html = render_page(&view);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"search\" placeholder=\"Search apps and games\" value=\"&quot;q&quot;\""));
        assert!(html.contains("<option value=\"size-asc\" selected=\"\">"));
        assert!(html.contains("<button data-filter=\"trending\" class=\"active\">"));
        assert!(html.contains("<div id=\"carousel\"></div>"));
        assert!(html.contains("<div id=\"item-list\"><div class=\"item-card\">"));
    }
}

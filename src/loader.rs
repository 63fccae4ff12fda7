use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Catalog, Item, TrendingSet};

pub const GAMES_FILE: &str = "games.json";
pub const APPS_FILE: &str = "apps.json";
pub const TRENDING_FILE: &str = "trending.txt";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("读取 {resource} 失败: {source}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },
    #[error("请求 {resource} 失败: {message}")]
    Http { resource: String, message: String },
    #[error("解析 {resource} 失败: {source}")]
    Json {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 数据来源：本地目录或 http(s) 基础地址
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Dir(PathBuf),
    Remote(String),
}

impl Source {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Source::Remote(value.trim_end_matches('/').to_string())
        } else {
            Source::Dir(PathBuf::from(value))
        }
    }

    /// 资源的完整位置，用于日志和错误信息
    pub fn locate(&self, name: &str) -> String {
        match self {
            Source::Dir(dir) => dir.join(name).display().to_string(),
            Source::Remote(base) => format!("{base}/{name}"),
        }
    }

    pub fn fetch_text(&self, name: &str) -> Result<String, LoadError> {
        let resource = self.locate(name);
        match self {
            Source::Dir(_) => fs::read_to_string(&resource).map_err(|source| LoadError::Io {
                resource: resource.clone(),
                source,
            }),
            Source::Remote(_) => ureq::get(&resource)
                .call()
                .map_err(|e| LoadError::Http {
                    resource: resource.clone(),
                    message: e.to_string(),
                })?
                .into_string()
                .map_err(|source| LoadError::Io {
                    resource: resource.clone(),
                    source,
                }),
        }
    }

    pub fn fetch_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, LoadError> {
        let body = self.fetch_text(name)?;
        serde_json::from_str(&body).map_err(|source| LoadError::Json {
            resource: self.locate(name),
            source,
        })
    }
}

/// 加载游戏与应用列表
pub fn load_catalog(source: &Source) -> Result<Catalog, LoadError> {
    let games: Vec<Item> = source.fetch_json(GAMES_FILE)?;
    let apps: Vec<Item> = source.fetch_json(APPS_FILE)?;
    tracing::info!(games = games.len(), apps = apps.len(), "目录已加载");
    Ok(Catalog::new(games, apps))
}

/// 加载热门名单
pub fn load_trending(source: &Source) -> Result<TrendingSet, LoadError> {
    let text = source.fetch_text(TRENDING_FILE)?;
    let trending = TrendingSet::from_text(&text);
    tracing::info!(names = trending.len(), "热门名单已加载");
    Ok(trending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("https://example.com/data/"),
            Source::Remote("https://example.com/data".to_string())
        );
        assert_eq!(Source::parse("./data"), Source::Dir(PathBuf::from("./data")));
        assert_eq!(
            Source::parse("http://host/base").locate("apps.json"),
            "http://host/base/apps.json"
        );
    }

    #[test]
    fn test_load_catalog_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            GAMES_FILE,
            r#"[{"name":"Chess","icon":"c.png","description":"d","size":"1GB"}]"#,
        );
        write(
            dir.path(),
            APPS_FILE,
            r#"[{"name":"Notes","type":"game"},{"name":"Mail","keywords":["email"]}]"#,
        );

        let catalog = load_catalog(&Source::Dir(dir.path().to_path_buf())).unwrap();
        assert_eq!(catalog.games().len(), 1);
        assert_eq!(catalog.apps().len(), 2);
        assert_eq!(catalog.apps()[0].kind, ItemType::App);
        assert_eq!(catalog.games()[0].size.as_deref(), Some("1GB"));
    }

    #[test]
    fn test_load_trending_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), TRENDING_FILE, "Chess\n  Mail  \n\n");
        let trending = load_trending(&Source::Dir(dir.path().to_path_buf())).unwrap();
        assert!(trending.contains("Chess"));
        assert!(trending.contains("Mail"));
        assert_eq!(trending.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_trending(&Source::Dir(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains(TRENDING_FILE));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), GAMES_FILE, "{not json");
        write(dir.path(), APPS_FILE, "[]");
        let err = load_catalog(&Source::Dir(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }
}

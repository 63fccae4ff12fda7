mod card;
mod config;
mod html;
mod loader;
mod models;
mod speech;
mod tasks;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::loader::Source;
use crate::models::{Category, SortOrder};
use crate::speech::{CommandRecognizer, NoRecognizer, SpeechRecognizer};
use crate::ui::{Action, App, VoiceInput, render};

/// 两帧之间等待按键的时间
const TICK: Duration = Duration::from_millis(100);

/// 浏览应用与游戏目录
#[derive(Parser)]
#[command(name = "appshelf", about = "Browse a catalog of apps and games")]
struct Args {
    /// 数据目录或 http(s) 地址，包含 games.json、apps.json、trending.txt
    #[arg(short, long, value_name = "DIR|URL")]
    data: Option<String>,

    /// 配置文件路径，默认 ~/.config/appshelf/config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 语音识别的语言区域
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,

    /// 导出静态 HTML 页面后退出
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// 导出时选中的分类 (all, games, apps, trending, recommended)
    #[arg(long, value_name = "FILTER", value_parser = parse_category, requires = "export")]
    category: Option<Category>,

    /// 导出时的排序 (time-desc, time-asc, size-asc, size-desc)
    #[arg(long, value_name = "ORDER", value_parser = parse_sort, requires = "export", conflicts_with = "category")]
    sort: Option<SortOrder>,

    /// 日志详细程度 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_filter(value).ok_or_else(|| format!("未知分类: {value}"))
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    SortOrder::from_value(value).ok_or_else(|| format!("未知排序: {value}"))
}

/// 获取数据目录路径 (~/.local/share/appshelf/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("appshelf");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 终端由界面占用，日志写入文件
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("appshelf={level}")))?;

    let log_path = get_data_dir()?.join("appshelf.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("无法打开日志文件 {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = match args.config.clone().or_else(config::default_config_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    Ok(config.with_overrides(args.data.clone(), args.locale.clone()))
}

/// 同步加载后生成页面，可选地先应用分类或排序
fn export_page(source: &Source, path: &Path, args: &Args) -> anyhow::Result<()> {
    let catalog = loader::load_catalog(source)?;
    if catalog.is_empty() {
        tracing::warn!("目录为空");
    }
    let mut app = App::new(None);
    app.dispatch(Action::CatalogLoaded(catalog));
    match loader::load_trending(source) {
        Ok(trending) => {
            app.dispatch(Action::TrendingLoaded(trending));
        }
        Err(e) => tracing::warn!(error = %e, "导出时未能加载热门名单"),
    }
    if let Some(category) = args.category {
        app.dispatch(Action::SelectCategory(category));
    }
    if let Some(order) = args.sort {
        app.apply_sort(order);
    }

    let page = html::render_page(&app.page_view());
    fs::write(path, page).with_context(|| format!("无法写入 {}", path.display()))?;
    tracing::info!(path = %path.display(), items = app.display_list.len(), "页面已导出");
    println!("页面已导出到 {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(&args)?;
    let source = Source::parse(&config.data);
    tracing::info!(?source, locale = %config.speech.locale, "启动");

    if let Some(path) = &args.export {
        return export_page(&source, path, &args);
    }

    let (tx, rx) = mpsc::channel();
    tasks::spawn_trending_load(source.clone(), tx.clone());
    tasks::spawn_catalog_load(source, tx.clone());

    let recognizer: Arc<dyn SpeechRecognizer> = match CommandRecognizer::new(&config.speech.command) {
        Some(recognizer) => Arc::new(recognizer),
        None => Arc::new(NoRecognizer),
    };
    let voice = VoiceInput {
        recognizer,
        locale: config.speech.locale.clone(),
        tx,
    };

    // 创建应用状态
    let mut app = App::new(Some(voice));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &rx);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("界面运行出错")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &Receiver<Action>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(TICK)? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }

        // 后台任务结果
        while let Ok(action) = rx.try_recv() {
            app.dispatch(action);
        }
    }
    Ok(())
}

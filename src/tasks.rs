//! 后台任务
//!
//! 数据加载和语音识别在独立线程中执行，结果以 Action 的形式发回主循环

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::loader::{self, Source};
use crate::speech::SpeechRecognizer;
use crate::ui::actions::Action;

/// 加载游戏与应用列表
pub fn spawn_catalog_load(source: Source, tx: Sender<Action>) {
    thread::spawn(move || {
        let action = match loader::load_catalog(&source) {
            Ok(catalog) => Action::CatalogLoaded(catalog),
            Err(e) => {
                tracing::error!(error = %e, "目录加载失败");
                Action::LoadFailed(e.to_string())
            }
        };
        // 接收端已关闭说明程序正在退出
        let _ = tx.send(action);
    });
}

/// 加载热门名单，与目录加载互不依赖
pub fn spawn_trending_load(source: Source, tx: Sender<Action>) {
    thread::spawn(move || {
        let action = match loader::load_trending(&source) {
            Ok(trending) => Action::TrendingLoaded(trending),
            Err(e) => {
                tracing::warn!(error = %e, "热门名单加载失败");
                Action::LoadFailed(e.to_string())
            }
        };
        let _ = tx.send(action);
    });
}

/// 一次性语音识别
pub fn spawn_voice_capture(
    recognizer: Arc<dyn SpeechRecognizer>,
    locale: String,
    tx: Sender<Action>,
) {
    thread::spawn(move || {
        let action = match recognizer.recognize(&locale) {
            Ok(transcript) => {
                tracing::info!(%transcript, "语音识别完成");
                Action::VoiceResult(transcript)
            }
            Err(e) => {
                tracing::warn!(error = %e, "语音识别失败");
                Action::VoiceFailed(e.to_string())
            }
        };
        let _ = tx.send(action);
    });
}

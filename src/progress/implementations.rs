// 進捗通知の具象実装

use super::ProgressSink;
use async_trait::async_trait;

/// コンソール出力による進捗通知
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressSink {
    quiet: bool,
}

impl ConsoleProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressSink for ConsoleProgressSink {
    async fn tick(&self, value: usize, max: usize) {
        if !self.quiet && (value % 100 == 0 || value == max) {
            let percentage = (value as f64 / max as f64) * 100.0;
            println!("⏳ Progress: {value}/{max} ({percentage:.1}%)");
        }
    }
}

/// 何もしない進捗通知（テスト・静音実行用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressSink;

impl NoOpProgressSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressSink for NoOpProgressSink {
    async fn tick(&self, _value: usize, _max: usize) {
        // 何もしない
    }
}

// 進捗表示
// 計測経路の外で動く、停止可能な周期ティッカー

pub mod implementations;

pub use implementations::{ConsoleProgressSink, NoOpProgressSink};

use async_trait::async_trait;
use mockall::automock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// ティックの通知先を抽象化するトレイト
#[automock]
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// 進捗が1進むたびに呼ばれる
    async fn tick(&self, value: usize, max: usize);
}

/// 協調的に停止できる周期ティッカー
///
/// 各ティックで継続フラグを確認し、`stop()`が呼ばれるか最大値へ
/// 達したら止まる。ベンチマーク本体とはスレッドを共有しないこと。
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    max: usize,
    interval: Duration,
    value: Arc<AtomicUsize>,
    running: Arc<AtomicBool>,
    stop_requested: Arc<AtomicBool>,
}

impl ProgressTicker {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            interval: Duration::from_millis(10),
            value: Arc::new(AtomicUsize::new(0)),
            running: Arc::new(AtomicBool::new(false)),
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn value(&self) -> usize {
        self.value.load(Ordering::Relaxed)
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// 次のティックで停止するよう要求する
    ///
    /// `run()`の開始前に呼ばれても有効で、その場合ループは一度も回らない。
    pub fn stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    /// 最大値へ達するか停止要求が来るまで周期的に進める
    ///
    /// 到達した値を返す。
    pub async fn run<S: ProgressSink>(&self, sink: &S) -> usize {
        self.running.store(true, Ordering::Relaxed);
        while self.value.load(Ordering::Relaxed) < self.max
            && !self.stop_requested.load(Ordering::Relaxed)
        {
            tokio::time::sleep(self.interval).await;
            let value = self.value.fetch_add(1, Ordering::Relaxed) + 1;
            sink.tick(value, self.max).await;
        }
        self.running.store(false, Ordering::Relaxed);
        self.value()
    }
}

impl Default for ProgressTicker {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticker_runs_to_completion() {
        let ticker = ProgressTicker::new(3).with_interval(Duration::from_millis(1));

        let reached = ticker.run(&NoOpProgressSink::new()).await;

        assert_eq!(reached, 3);
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn test_ticker_notifies_sink_each_tick() {
        let mut sink = MockProgressSink::new();
        sink.expect_tick().times(3).returning(|_, _| ());

        let ticker = ProgressTicker::new(3).with_interval(Duration::from_millis(1));
        ticker.run(&sink).await;
    }

    #[tokio::test]
    async fn test_ticker_stops_on_request() {
        let ticker = ProgressTicker::new(1000).with_interval(Duration::from_millis(5));

        let handle = {
            let ticker = ticker.clone();
            tokio::spawn(async move { ticker.run(&NoOpProgressSink::new()).await })
        };

        tokio::time::sleep(Duration::from_millis(25)).await;
        ticker.stop();
        let reached = handle.await.unwrap();

        // 停止要求後は最大値まで進まない
        assert!(reached < 1000);
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn test_stop_before_run_prevents_any_tick() {
        let ticker = ProgressTicker::new(1000).with_interval(Duration::from_millis(1));

        ticker.stop();
        let reached = ticker.run(&NoOpProgressSink::new()).await;

        assert_eq!(reached, 0);
    }

    #[tokio::test]
    async fn test_default_ticker_matches_progress_bar_maximum() {
        let ticker = ProgressTicker::default();

        assert_eq!(ticker.max(), 1000);
        assert_eq!(ticker.value(), 0);
    }
}

pub mod cli;
pub mod containers;
pub mod probe;
pub mod progress;
pub mod report;
pub mod runner;

pub use containers::ContainerKind;
pub use report::{Measured, Measurement, Report, Section};
pub use runner::{catalogue_names, BenchConfig, BenchError, BenchmarkRunner};

use anyhow::Result;

// ヒープ計測のバイトカウンタをプロセス全体へ適用する
#[global_allocator]
static GLOBAL_ALLOC: probe::CountingAllocator = probe::CountingAllocator;

/// カタログ全件を既定設定で実行する単一のエントリポイント
///
/// どのホスト（CLI、GUIのボタンハンドラ、テストハーネス）からも
/// 呼び出せる。`max_items`が負の場合は何も実行せずエラーを返す。
pub fn run_all(max_items: i64) -> Result<Report> {
    if max_items < 0 {
        return Err(BenchError::invalid_parameter(
            "max_items",
            format!("must be non-negative, got {max_items}"),
        )
        .into());
    }

    let config = BenchConfig::new(max_items as usize);
    config.validate()?;

    Ok(BenchmarkRunner::new(config).run_all())
}

use crate::progress::{ConsoleProgressSink, ProgressTicker};
use anyhow::Result;
use std::path::PathBuf;

/// Configuration struct for the run command
pub struct RunConfig {
    pub items: i64,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub force: bool,
    pub quiet: bool,
}

/// Execute the full benchmark catalogue and emit the report
pub async fn execute_run(config: RunConfig) -> Result<()> {
    // Check if output file already exists
    if let Some(path) = &config.output {
        if path.exists() && !config.force {
            anyhow::bail!(
                "Output file already exists: {}. Use --force to overwrite.",
                path.display()
            );
        }
    }

    if !config.quiet {
        println!("🚀 コンテナベンチマーク開始");
        println!("   - ベース件数: {}", config.items);
    }

    let ticker = ProgressTicker::default();
    let ticker_task = if config.quiet {
        None
    } else {
        let ticker = ticker.clone();
        Some(tokio::spawn(async move {
            ticker.run(&ConsoleProgressSink::new()).await
        }))
    };

    // 計測はブロッキングスレッドで実行し、ティッカーの動く
    // 非同期スレッドを塞がない
    let items = config.items;
    let report = tokio::task::spawn_blocking(move || crate::run_all(items)).await??;

    ticker.stop();
    if let Some(task) = ticker_task {
        let _ = task.await;
    }

    let rendered = if config.json {
        report.to_json()?
    } else {
        report.to_text()
    };

    match &config.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            if !config.quiet {
                println!("📄 結果は {} に保存されました", path.display());
            }
        }
        None => println!("{rendered}"),
    }

    if !config.quiet {
        println!("✅ 完了! ({}セクション)", report.sections.len());
    }

    Ok(())
}

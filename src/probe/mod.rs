// 計測プローブ
// 経過時間の計測とヒープ使用量の差分計測

pub mod heap;

pub use heap::{
    memory_delta_kb, CountingAllocator, GlobalHeap, HeapIntrospector, MockHeapIntrospector,
};

use std::time::{Duration, Instant};

/// 同期的な処理の経過時間を計測する
///
/// 単調増加クロック（`Instant`）で`work`の実行を囲むだけの薄いラッパー。
/// `work`内のパニックはそのまま呼び出し元へ伝播する。
pub fn measure<F, R>(work: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = work();
    let elapsed = start.elapsed();
    (result, elapsed)
}

// ベンチマーク実行エンジン
// 固定カタログの各ケースを宣言順に同期実行し、レポートへ蓄積する

pub mod error;

pub use error::BenchError;

use crate::containers::{self, ops, ContainerKind};
use crate::probe::{self, memory_delta_kb, GlobalHeap, HeapIntrospector};
use crate::report::{Measurement, Report, Section};
use rand::Rng;
use std::hint::black_box;

/// 各ケースの件数と試行回数を明示的に持つ設定
///
/// 既定値は`items_count`ひとつから導出するが、全フィールドを個別に
/// 上書きできる。各ケースの除数・倍率はマジックナンバーではなく
/// 名前付きの設定値として持つ。
#[derive(Debug, Clone)]
pub struct BenchConfig {
    items_count: usize,
    append_array_items: usize,
    prepend_vec_items: usize,
    mem_items: usize,
    count_tries: (usize, usize),
    contains_items: usize,
    iter_rounds: (usize, usize),
    random_access_items: usize,
    random_access_tries: usize,
}

impl BenchConfig {
    pub fn new(items_count: usize) -> Self {
        Self {
            items_count,
            // 1要素ずつの再確保はO(n²)なので件数を落とす
            append_array_items: items_count / 100,
            prepend_vec_items: items_count / 100,
            mem_items: items_count.saturating_mul(100),
            count_tries: (items_count, items_count.saturating_mul(1000)),
            contains_items: items_count / 6,
            iter_rounds: (items_count, items_count.saturating_mul(10)),
            random_access_items: items_count.saturating_mul(10_000),
            random_access_tries: items_count.saturating_mul(10_000),
        }
    }

    pub fn with_append_array_items(mut self, items: usize) -> Self {
        self.append_array_items = items;
        self
    }

    pub fn with_prepend_vec_items(mut self, items: usize) -> Self {
        self.prepend_vec_items = items;
        self
    }

    pub fn with_mem_items(mut self, items: usize) -> Self {
        self.mem_items = items;
        self
    }

    pub fn with_count_tries(mut self, low: usize, high: usize) -> Self {
        self.count_tries = (low, high);
        self
    }

    pub fn with_contains_items(mut self, items: usize) -> Self {
        self.contains_items = items;
        self
    }

    pub fn with_iter_rounds(mut self, low: usize, high: usize) -> Self {
        self.iter_rounds = (low, high);
        self
    }

    pub fn with_random_access(mut self, items: usize, tries: usize) -> Self {
        self.random_access_items = items;
        self.random_access_tries = tries;
        self
    }

    pub fn items_count(&self) -> usize {
        self.items_count
    }

    /// 要素値が連番のi32なので、コンテナ件数はi32の値域に収める
    pub fn validate(&self) -> Result<(), BenchError> {
        const MAX: usize = i32::MAX as usize;
        let element_counts = [
            ("items_count", self.items_count),
            ("append_array_items", self.append_array_items),
            ("prepend_vec_items", self.prepend_vec_items),
            ("mem_items", self.mem_items),
            ("contains_items", self.contains_items),
            ("iter_rounds", self.iter_rounds.1),
            ("random_access_items", self.random_access_items),
        ];
        for (field, value) in element_counts {
            if value > MAX {
                return Err(BenchError::invalid_parameter(
                    field,
                    format!("{value} exceeds i32::MAX; element values are sequential i32"),
                ));
            }
        }
        Ok(())
    }
}

type CaseFn = fn(&BenchmarkRunner) -> Vec<Measurement>;

/// 実行順に並んだベンチマークカタログ
const CATALOGUE: &[(&str, CaseFn)] = &[
    ("Fill/Append tests", BenchmarkRunner::bench_fill_append),
    ("Prepend tests", BenchmarkRunner::bench_prepend),
    ("Insertion tests", BenchmarkRunner::bench_insertion),
    ("Memory usage tests", BenchmarkRunner::bench_memory_usage),
    ("Count() speed tests", BenchmarkRunner::bench_count),
    ("Contains() speed tests", BenchmarkRunner::bench_contains),
    ("Foreach() loop speed tests", BenchmarkRunner::bench_foreach),
    ("For() loop speed tests", BenchmarkRunner::bench_for),
    ("Random access speed tests", BenchmarkRunner::bench_random_access),
];

/// カタログのセクション名を実行順で返す
pub fn catalogue_names() -> Vec<&'static str> {
    CATALOGUE.iter().map(|(name, _)| *name).collect()
}

/// カタログを所有し、単一スレッドで順番に実行するランナー
pub struct BenchmarkRunner {
    config: BenchConfig,
    heap: Box<dyn HeapIntrospector>,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self::with_heap(config, Box::new(GlobalHeap::new()))
    }

    /// ヒープ計測プリミティブを差し替える（テスト用）
    pub fn with_heap(config: BenchConfig, heap: Box<dyn HeapIntrospector>) -> Self {
        Self { config, heap }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// カタログ全件を宣言順に実行し、レポートを返す
    ///
    /// ケース内のパニックはそのまま伝播し、残りの実行を中断する。
    pub fn run_all(&self) -> Report {
        let mut report = Report::new(self.config.items_count);
        for (name, case) in CATALOGUE {
            report.push_section(Section::new(name, case(self)));
        }
        report
    }

    fn bench_fill_append(&self) -> Vec<Measurement> {
        let n = self.config.items_count;
        let mut out = Vec::new();

        let (arr, elapsed) = probe::measure(|| containers::filled_array(n));
        black_box(arr);
        out.push(Measurement::elapsed(ContainerKind::Array, "fill", n, None, elapsed));

        // 件数を落としたまま実測値を記録する。縮小した計測を倍率で
        // 補正した「見積もり」は報告しない。
        let m = self.config.append_array_items;
        let (arr, elapsed) = probe::measure(|| ops::append_array(m));
        black_box(arr);
        out.push(Measurement::elapsed(ContainerKind::Array, "append", m, None, elapsed));

        let (lst, elapsed) = probe::measure(|| containers::filled_vec(n));
        black_box(lst);
        out.push(Measurement::elapsed(ContainerKind::GrowableList, "append", n, None, elapsed));

        let (lst, elapsed) = probe::measure(|| containers::filled_linked_list(n));
        black_box(lst);
        out.push(Measurement::elapsed(ContainerKind::LinkedList, "append", n, None, elapsed));

        out
    }

    fn bench_prepend(&self) -> Vec<Measurement> {
        let mut out = Vec::new();

        let m = self.config.prepend_vec_items;
        let (lst, elapsed) = probe::measure(|| ops::prepend_vec(m));
        black_box(lst);
        out.push(Measurement::elapsed(ContainerKind::GrowableList, "prepend", m, None, elapsed));

        let n = self.config.items_count;
        let (lst, elapsed) = probe::measure(|| ops::prepend_linked_list(n));
        black_box(lst);
        out.push(Measurement::elapsed(ContainerKind::LinkedList, "prepend", n, None, elapsed));

        out
    }

    fn bench_insertion(&self) -> Vec<Measurement> {
        let n = self.config.items_count;
        let mut out = Vec::new();

        let (lst, elapsed) = probe::measure(|| ops::middle_insert_vec(n));
        black_box(lst);
        out.push(Measurement::elapsed(
            ContainerKind::GrowableList,
            "middle insert",
            n,
            None,
            elapsed,
        ));

        let (lst, elapsed) = probe::measure(|| ops::cursor_insert_linked_list(n));
        black_box(lst);
        out.push(Measurement::elapsed(
            ContainerKind::LinkedList,
            "cursor insert",
            n,
            None,
            elapsed,
        ));

        out
    }

    fn bench_memory_usage(&self) -> Vec<Measurement> {
        let m = self.config.mem_items;
        let mut out = Vec::new();

        let (arr, kb) = memory_delta_kb(self.heap.as_ref(), || containers::filled_array(m));
        drop(arr);
        out.push(Measurement::heap_kb(ContainerKind::Array, "bulk construction", m, kb));

        let (lst, kb) = memory_delta_kb(self.heap.as_ref(), || containers::filled_vec(m));
        drop(lst);
        out.push(Measurement::heap_kb(ContainerKind::GrowableList, "bulk construction", m, kb));

        let (lst, kb) = memory_delta_kb(self.heap.as_ref(), || containers::filled_linked_list(m));
        drop(lst);
        out.push(Measurement::heap_kb(ContainerKind::LinkedList, "bulk construction", m, kb));

        out
    }

    fn bench_count(&self) -> Vec<Measurement> {
        let n = self.config.items_count;
        let mut out = Vec::new();

        // 試行回数を1000倍にしても経過時間が約1000倍で収まることが
        // O(1)長さ取得の確認になる
        for tries in [self.config.count_tries.0, self.config.count_tries.1] {
            let arr = containers::filled_array(n);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..tries {
                    black_box(arr.len());
                }
            });
            out.push(Measurement::elapsed(ContainerKind::Array, "count", n, Some(tries), elapsed));

            let lst = containers::filled_vec(n);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..tries {
                    black_box(lst.len());
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::GrowableList,
                "count",
                n,
                Some(tries),
                elapsed,
            ));

            let lst = containers::filled_linked_list(n);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..tries {
                    black_box(lst.len());
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::LinkedList,
                "count",
                n,
                Some(tries),
                elapsed,
            ));
        }

        out
    }

    fn bench_contains(&self) -> Vec<Measurement> {
        // 線形走査×試行回数でO(n²)相当になるため件数を絞る
        let m = self.config.contains_items;
        let tries = m;
        let mut out = Vec::new();

        let arr = containers::filled_array(m);
        let (_, elapsed) = probe::measure(|| {
            for i in 0..tries {
                black_box(arr.contains(&(i as i32)));
            }
        });
        out.push(Measurement::elapsed(ContainerKind::Array, "contains", m, Some(tries), elapsed));

        let lst = containers::filled_vec(m);
        let (_, elapsed) = probe::measure(|| {
            for i in 0..tries {
                black_box(lst.contains(&(i as i32)));
            }
        });
        out.push(Measurement::elapsed(
            ContainerKind::GrowableList,
            "contains",
            m,
            Some(tries),
            elapsed,
        ));

        let lst = containers::filled_linked_list(m);
        let (_, elapsed) = probe::measure(|| {
            for i in 0..tries {
                black_box(lst.contains(&(i as i32)));
            }
        });
        out.push(Measurement::elapsed(
            ContainerKind::LinkedList,
            "contains",
            m,
            Some(tries),
            elapsed,
        ));

        out
    }

    fn bench_foreach(&self) -> Vec<Measurement> {
        let mut out = Vec::new();

        for rounds in [self.config.iter_rounds.0, self.config.iter_rounds.1] {
            let arr = containers::filled_array(rounds);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..rounds {
                    for value in arr.iter() {
                        black_box(value);
                    }
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::Array,
                "foreach",
                rounds,
                Some(rounds),
                elapsed,
            ));

            let lst = containers::filled_vec(rounds);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..rounds {
                    for value in lst.iter() {
                        black_box(value);
                    }
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::GrowableList,
                "foreach",
                rounds,
                Some(rounds),
                elapsed,
            ));

            let lst = containers::filled_linked_list(rounds);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..rounds {
                    for value in lst.iter() {
                        black_box(value);
                    }
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::LinkedList,
                "foreach",
                rounds,
                Some(rounds),
                elapsed,
            ));
        }

        out
    }

    fn bench_for(&self) -> Vec<Measurement> {
        // 連結リストの添字走査は1アクセスごとにO(n)となりO(n²)に
        // 跳ね上がるため、このケースからは除外する
        let mut out = Vec::new();

        for rounds in [self.config.iter_rounds.0, self.config.iter_rounds.1] {
            let arr = containers::filled_array(rounds);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..rounds {
                    for j in 0..arr.len() {
                        black_box(arr[j]);
                    }
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::Array,
                "for",
                rounds,
                Some(rounds),
                elapsed,
            ));

            let lst = containers::filled_vec(rounds);
            let (_, elapsed) = probe::measure(|| {
                for _ in 0..rounds {
                    for j in 0..lst.len() {
                        black_box(lst[j]);
                    }
                }
            });
            out.push(Measurement::elapsed(
                ContainerKind::GrowableList,
                "for",
                rounds,
                Some(rounds),
                elapsed,
            ));
        }

        out
    }

    fn bench_random_access(&self) -> Vec<Measurement> {
        // 連結リストには添字アクセスに相当する操作がないので対象外
        let items = self.config.random_access_items;
        let tries = if items == 0 {
            0
        } else {
            self.config.random_access_tries
        };
        let mut out = Vec::new();

        let arr = containers::filled_array(items);
        let mut rng = rand::rng();
        let (_, elapsed) = probe::measure(|| {
            for _ in 0..tries {
                let index = rng.random_range(0..items);
                black_box(arr[index]);
            }
        });
        out.push(Measurement::elapsed(
            ContainerKind::Array,
            "random access",
            items,
            Some(tries),
            elapsed,
        ));

        let lst = containers::filled_vec(items);
        let mut rng = rand::rng();
        let (_, elapsed) = probe::measure(|| {
            for _ in 0..tries {
                let index = rng.random_range(0..items);
                black_box(lst[index]);
            }
        });
        out.push(Measurement::elapsed(
            ContainerKind::GrowableList,
            "random access",
            items,
            Some(tries),
            elapsed,
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MockHeapIntrospector;
    use crate::report::Measured;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 単体テストが数ミリ秒で終わる縮小設定
    fn small_config() -> BenchConfig {
        BenchConfig::new(50)
            .with_mem_items(50)
            .with_count_tries(50, 500)
            .with_iter_rounds(20, 40)
            .with_random_access(100, 100)
    }

    #[test]
    fn test_default_config_derives_from_items_count() {
        let config = BenchConfig::new(5600);

        assert_eq!(config.items_count(), 5600);
        assert_eq!(config.append_array_items, 56);
        assert_eq!(config.prepend_vec_items, 56);
        assert_eq!(config.mem_items, 560_000);
        assert_eq!(config.count_tries, (5600, 5_600_000));
        assert_eq!(config.contains_items, 933);
        assert_eq!(config.iter_rounds, (5600, 56_000));
        assert_eq!(config.random_access_items, 56_000_000);
        assert_eq!(config.random_access_tries, 56_000_000);
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = BenchConfig::new(1000)
            .with_append_array_items(10)
            .with_prepend_vec_items(20)
            .with_mem_items(30)
            .with_count_tries(40, 50)
            .with_contains_items(60)
            .with_iter_rounds(70, 80)
            .with_random_access(90, 95);

        assert_eq!(config.append_array_items, 10);
        assert_eq!(config.prepend_vec_items, 20);
        assert_eq!(config.mem_items, 30);
        assert_eq!(config.count_tries, (40, 50));
        assert_eq!(config.contains_items, 60);
        assert_eq!(config.iter_rounds, (70, 80));
        assert_eq!(config.random_access_items, 90);
        assert_eq!(config.random_access_tries, 95);
    }

    #[test]
    fn test_validate_rejects_counts_beyond_i32() {
        let config = BenchConfig::new(100).with_mem_items(i32::MAX as usize + 1);

        let error = config.validate().unwrap_err();

        assert!(error.to_string().contains("mem_items"));
    }

    #[test]
    fn test_validate_accepts_default_items_count() {
        assert!(BenchConfig::new(5600).validate().is_ok());
        assert!(BenchConfig::new(0).validate().is_ok());
    }

    #[test]
    fn test_catalogue_names_order() {
        let names = catalogue_names();

        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Fill/Append tests");
        assert_eq!(names[3], "Memory usage tests");
        assert_eq!(names[8], "Random access speed tests");
    }

    #[test]
    fn test_run_all_fills_every_section() {
        let report = BenchmarkRunner::new(small_config()).run_all();

        assert_eq!(report.section_names(), catalogue_names());
        for section in &report.sections {
            assert!(
                !section.measurements.is_empty(),
                "section {} is empty",
                section.name
            );
        }
    }

    #[test]
    fn test_run_all_with_zero_items() {
        let config = BenchConfig::new(0);
        let report = BenchmarkRunner::new(config).run_all();

        assert_eq!(report.sections.len(), 9);
        // 乱数アクセスは空コンテナで試行0回に落ちる
        let random = &report.sections[8];
        assert!(random.measurements.iter().all(|m| m.tries == Some(0)));
    }

    #[test]
    fn test_memory_section_uses_heap_introspector() {
        let mut mock = MockHeapIntrospector::new();
        let calls = AtomicUsize::new(0);
        // 呼び出しごとに2048バイト増えるカウンタ → 各種別の差分は2 Kb
        mock.expect_live_bytes()
            .times(6)
            .returning(move || calls.fetch_add(1, Ordering::Relaxed) * 2048);

        let runner = BenchmarkRunner::with_heap(small_config(), Box::new(mock));
        let measurements = runner.bench_memory_usage();

        assert_eq!(measurements.len(), 3);
        for m in &measurements {
            assert_eq!(m.value, Measured::HeapKb(2));
        }
    }

    #[test]
    fn test_count_section_has_both_try_scales() {
        let runner = BenchmarkRunner::new(small_config());
        let measurements = runner.bench_count();

        let tries: Vec<Option<usize>> = measurements.iter().map(|m| m.tries).collect();
        assert_eq!(
            tries,
            vec![
                Some(50),
                Some(50),
                Some(50),
                Some(500),
                Some(500),
                Some(500)
            ]
        );
    }

    #[test]
    fn test_indexed_cases_exclude_linked_list() {
        let runner = BenchmarkRunner::new(small_config());

        for m in runner.bench_for().iter().chain(runner.bench_random_access().iter()) {
            assert_ne!(m.kind, ContainerKind::LinkedList);
        }
    }
}

// 計測結果の蓄積と整形
// 1回の実行の間だけ単調に成長し、実行が終われば破棄される

use crate::containers::ContainerKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// セクション見出しの区切り線
const DELIMITER: &str = "**********************************************";

/// 1回の計測が返す値
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measured {
    /// 経過時間
    Elapsed(Duration),
    /// ヒープ差分（KiB）
    HeapKb(i64),
}

/// 1ケース・1種別ぶんの計測結果。生成後は変更しない
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub kind: ContainerKind,
    pub case: &'static str,
    pub items_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tries: Option<usize>,
    pub value: Measured,
}

impl Measurement {
    pub fn elapsed(
        kind: ContainerKind,
        case: &'static str,
        items_count: usize,
        tries: Option<usize>,
        elapsed: Duration,
    ) -> Self {
        Self {
            kind,
            case,
            items_count,
            tries,
            value: Measured::Elapsed(elapsed),
        }
    }

    pub fn heap_kb(
        kind: ContainerKind,
        case: &'static str,
        items_count: usize,
        kilobytes: i64,
    ) -> Self {
        Self {
            kind,
            case,
            items_count,
            tries: None,
            value: Measured::HeapKb(kilobytes),
        }
    }

    /// レポート本文に出すサブテスト名
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.label(), self.case)
    }
}

/// カタログの1見出しぶんの計測結果列
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: &'static str,
    pub measurements: Vec<Measurement>,
}

impl Section {
    pub fn new(name: &'static str, measurements: Vec<Measurement>) -> Self {
        Self { name, measurements }
    }
}

/// 1回の実行ぶんのレポート全体
#[derive(Debug, Serialize)]
pub struct Report {
    pub created_at: DateTime<Utc>,
    pub max_items: usize,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(max_items: usize) -> Self {
        Self {
            created_at: Utc::now(),
            max_items,
            sections: Vec::new(),
        }
    }

    /// セクションを実行順のまま末尾へ追加する
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.name).collect()
    }

    /// セクションごとのブロックを連ねた平文レポートを生成する
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            out.push_str(&format!("\n{DELIMITER}\n"));
            out.push_str(&format!("Test #{}: {}\n\n", index + 1, section.name));

            for m in &section.measurements {
                out.push_str(&format!("SubTest: {}\n", m.label()));
                match m.tries {
                    Some(tries) => {
                        out.push_str(&format!("Items: {}\n", m.items_count));
                        out.push_str(&format!("Called times: {tries}\n"));
                    }
                    None => out.push_str(&format!("Range: 0..{}\n", m.items_count)),
                }
                match &m.value {
                    Measured::Elapsed(elapsed) => out.push_str(&format!("Time: {elapsed:?}\n")),
                    Measured::HeapKb(kb) => out.push_str(&format!("Memory: {kb} Kb\n")),
                }
                out.push('\n');
            }
        }
        out
    }

    /// レポートをJSONとして整形する
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

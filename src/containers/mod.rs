// 計測対象コンテナの種別と生成
// 連番の整数列で埋めた新品のコンテナを各ケースへ供給する

pub mod ops;

use serde::Serialize;
use std::collections::LinkedList;

/// 計測対象のコンテナ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerKind {
    /// 固定長の連続領域。伸長には再確保と全コピーが要る
    Array,
    /// 容量倍増による償却O(1)追加を持つ連続領域
    GrowableList,
    /// 双方向連結リスト。ノード参照があればO(1)挿入、添字アクセスなし
    LinkedList,
}

impl ContainerKind {
    /// 全種別を宣言順で並べた配列
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::Array,
        ContainerKind::GrowableList,
        ContainerKind::LinkedList,
    ];

    /// レポート上の表示名
    pub const fn label(&self) -> &'static str {
        match self {
            ContainerKind::Array => "Box<[i32]>",
            ContainerKind::GrowableList => "Vec<i32>",
            ContainerKind::LinkedList => "LinkedList<i32>",
        }
    }
}

/// `0..items_count` の連番で埋めた固定長配列を生成する
pub fn filled_array(items_count: usize) -> Box<[i32]> {
    let mut arr = vec![0i32; items_count].into_boxed_slice();
    for (i, slot) in arr.iter_mut().enumerate() {
        *slot = i as i32;
    }
    arr
}

/// `0..items_count` の連番をpushで積んだVecを生成する
///
/// 容量は予約しない。増分再確保も追加コストの一部として計測する。
pub fn filled_vec(items_count: usize) -> Vec<i32> {
    let mut lst = Vec::new();
    for i in 0..items_count {
        lst.push(i as i32);
    }
    lst
}

/// `0..items_count` の連番を末尾追加した連結リストを生成する
pub fn filled_linked_list(items_count: usize) -> LinkedList<i32> {
    let mut lst = LinkedList::new();
    for i in 0..items_count {
        lst.push_back(i as i32);
    }
    lst
}

// 計測対象の操作
// 各操作はコンテナを構築して返す純粋な関数として切り出し、
// タイミングループから独立して単体テストできるようにする

use std::collections::LinkedList;

/// 1要素ずつ再確保・全コピーで伸長する最悪ケースの配列追加
///
/// 1スロットの配列から始めて、1回の追加ごとに新しい配列を確保して
/// 全要素を写す（合計O(n²)）。`max_integer == 0` なら1要素の配列の
/// まま、ループは一度も回らない。
pub fn append_array(max_integer: usize) -> Box<[i32]> {
    let mut arr = vec![0i32; 1].into_boxed_slice();
    for i in 0..max_integer {
        let mut grown = vec![0i32; arr.len() + 1].into_boxed_slice();
        grown[..arr.len()].copy_from_slice(&arr);
        arr = grown;
        arr[i] = i as i32;
    }
    arr
}

/// 先頭挿入をmax_integer回繰り返したVecを返す
///
/// 挿入のたびに既存要素が全てひとつ後ろへずれる（1回あたりO(n)）。
pub fn prepend_vec(max_integer: usize) -> Vec<i32> {
    let mut lst = Vec::new();
    for i in 0..max_integer {
        lst.insert(0, i as i32);
    }
    lst
}

/// 先頭追加をmax_integer回繰り返した連結リストを返す
///
/// 先頭ノードへの接続はO(1)。先頭要素は常に直近で追加した値になる。
pub fn prepend_linked_list(max_integer: usize) -> LinkedList<i32> {
    let mut lst = LinkedList::new();
    for i in 0..max_integer {
        lst.push_front(i as i32);
    }
    lst
}

/// 中央位置への挿入をmax_integer回繰り返したVecを返す
///
/// 1回の挿入で要素のおよそ半分がずれる。
pub fn middle_insert_vec(max_integer: usize) -> Vec<i32> {
    let mut lst = Vec::new();
    for i in 0..max_integer {
        let mid = lst.len() / 2;
        lst.insert(mid, i as i32);
    }
    lst
}

/// 固定の挿入点の直後へ値2..max_integerを挿入し続けた連結リストを返す
///
/// 安定版の`LinkedList`にはカーソルAPIがないため、挿入点でリストを
/// 二つに分けたまま保持する。カーソル直後への挿入は後半リストへの
/// `push_front`（O(1)）と等価で、カーソルの再探索は発生しない。
/// 最後に前半と後半をO(1)の`append`で連結する。
pub fn cursor_insert_linked_list(max_integer: usize) -> LinkedList<i32> {
    let mut head = LinkedList::new();
    head.push_back(1);
    head.push_back(2);

    let mut after_cursor = LinkedList::new();
    for i in 2..max_integer {
        after_cursor.push_front(i as i32);
    }

    head.append(&mut after_cursor);
    head
}

// ベンチマーク実行のエラー型定義

use thiserror::Error;

/// 実行前のパラメータ検証で棄却される不正値
///
/// 通常のパラメータで失敗するケースは存在しないため、リトライや
/// 部分失敗の仕組みは持たない。検証を通過した後の失敗（巨大件数での
/// 確保失敗など）はそのまま実行を中断させる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    #[error("invalid parameter: {field} - {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl BenchError {
    /// パラメータ検証エラーの作成
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

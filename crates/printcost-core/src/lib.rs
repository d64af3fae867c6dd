//! # PrintCost Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod money;
pub mod product;
pub mod store;

// Re-export 主要類型
pub use config::{Settings, SettingsForm};
pub use money::{format_currency, round2};
pub use product::{Product, ProductDraft};
pub use store::{ProductStore, SettingsStore};

/// 成本引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("輸入驗證失敗: {0}")]
    Validation(String),

    #[error("找不到產品: {0}")]
    ProductNotFound(u64),

    #[error("無效的折扣: {0}")]
    InvalidDiscount(String),

    #[error("優惠券無法使用: {0}")]
    CouponRejected(String),

    #[error("儲存錯誤: {0}")]
    Storage(String),

    #[error("序列化錯誤: {0}")]
    Serialization(String),

    #[error("重新計算失敗: {0}")]
    RecalculationFailed(String),
}

pub type Result<T> = std::result::Result<T, CostError>;

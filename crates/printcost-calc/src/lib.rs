//! # PrintCost Calculation Engine
//!
//! 3D 列印成本計算引擎

pub mod advanced;
pub mod calculator;
pub mod depreciation;
pub mod discount;
pub mod engine;

// Re-export 主要類型
pub use advanced::{AdvancedBreakdown, AdvancedCalculator, AdvancedInput, FilamentGeometry};
pub use calculator::{CostBreakdown, CostCalculator};
pub use depreciation::DepreciationBasis;
pub use discount::{Coupon, Discount, SaleQuote};
pub use engine::CostEngine;

/// 低利潤警告門檻（佔售價百分比）
pub const LOW_MARGIN_THRESHOLD: f64 = 20.0;

/// 利潤率健康度
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MarginHealth {
    /// 低於門檻
    Low,
    /// 達到門檻
    Healthy,
}

impl MarginHealth {
    /// 依實際利潤率（佔售價百分比）分類
    pub fn classify(real_margin: f64) -> Self {
        if real_margin < LOW_MARGIN_THRESHOLD {
            MarginHealth::Low
        } else {
            MarginHealth::Healthy
        }
    }

    pub fn is_low(&self) -> bool {
        *self == MarginHealth::Low
    }
}

/// 全目錄重新計算結果
#[derive(Debug, Clone)]
pub struct RecalculationReport {
    /// 本次重算ID（日誌關聯用）
    pub run_id: uuid::Uuid,

    /// 重算後的完整產品清單
    pub products: Vec<printcost_core::Product>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl RecalculationReport {
    /// 創建重算結果
    pub fn new(products: Vec<printcost_core::Product>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            products,
            calculation_time_ms: None,
        }
    }

    /// 重算的產品數量
    pub fn count(&self) -> usize {
        self.products.len()
    }
}

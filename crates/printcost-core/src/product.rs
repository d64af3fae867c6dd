//! 產品模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CostError, Result};

/// 目錄中的產品
///
/// `total_cost` 與 `sale_price` 是成本引擎輸出的快取值，只在儲存產品或
/// 全目錄重新計算時寫入；讀取時不會自動重算，設定變更後會保持舊值直到下次重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: u64,

    /// 名稱
    #[serde(rename = "nome")]
    pub name: String,

    /// 重量（克）
    #[serde(rename = "peso_g")]
    pub weight_g: f64,

    /// 列印時間（小時）
    #[serde(rename = "tempo_h")]
    pub print_time_h: f64,

    /// 總成本（快取）
    #[serde(rename = "custo_total")]
    pub total_cost: f64,

    /// 售價（快取）
    #[serde(rename = "preco_venda")]
    pub sale_price: f64,

    /// 建立時間
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// 創建新的產品（尚未計算成本）
    pub fn new(id: u64, name: String, weight_g: f64, print_time_h: f64) -> Self {
        Self {
            id,
            name,
            weight_g,
            print_time_h,
            total_cost: 0.0,
            sale_price: 0.0,
            created_at: Utc::now(),
        }
    }

    /// 建構器模式：設置建立時間
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// 寫入快取的成本與售價
    pub fn apply_pricing(&mut self, total_cost: f64, sale_price: f64) {
        self.total_cost = total_cost;
        self.sale_price = sale_price;
    }

    /// 依快取值計算的實際利潤率（佔售價百分比）
    pub fn real_margin(&self) -> f64 {
        if self.sale_price > 0.0 {
            (self.sale_price - self.total_cost) / self.sale_price * 100.0
        } else {
            0.0
        }
    }
}

/// 產品表單輸入
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub weight_g: f64,
    pub print_time_h: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, weight_g: f64, print_time_h: f64) -> Self {
        Self {
            name: name.into(),
            weight_g,
            print_time_h,
        }
    }

    /// 呼叫成本引擎前的驗證
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CostError::Validation("產品名稱不可為空".to_string()));
        }
        if !(self.weight_g.is_finite() && self.weight_g > 0.0) {
            return Err(CostError::Validation(format!(
                "重量必須大於 0：{}",
                self.weight_g
            )));
        }
        if !(self.print_time_h.is_finite() && self.print_time_h > 0.0) {
            return Err(CostError::Validation(format!(
                "列印時間必須大於 0：{}",
                self.print_time_h
            )));
        }
        Ok(())
    }
}

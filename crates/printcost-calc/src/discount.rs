//! 銷售折扣計算

use chrono::NaiveDate;
use printcost_core::{round2, CostError, Result};
use serde::{Deserialize, Serialize};

/// 銷售報價
///
/// 以產品快取的售價與成本計算，折扣以百分比輸入。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleQuote {
    /// 原售價
    pub list_price: f64,
    /// 折扣百分比
    pub discount_pct: f64,
    /// 折扣金額（未捨入，僅供顯示）
    pub discount_value: f64,
    /// 成交金額
    pub final_value: f64,
    /// 利潤
    pub profit: f64,
}

impl SaleQuote {
    /// 計算報價
    pub fn new(list_price: f64, total_cost: f64, discount_pct: f64) -> Self {
        let discount_value = list_price * (discount_pct / 100.0);
        let final_value = round2(list_price * (1.0 - discount_pct / 100.0));
        let profit = round2(final_value - total_cost);

        Self {
            list_price,
            discount_pct,
            discount_value,
            final_value,
            profit,
        }
    }

    /// 是否虧本
    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}

/// 折扣方式（促銷與優惠券共用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo_desconto", content = "valor_desconto")]
pub enum Discount {
    /// 百分比折扣
    #[serde(rename = "percentual")]
    Percentage(f64),
    /// 固定金額折扣
    #[serde(rename = "fixo")]
    Fixed(f64),
}

impl Discount {
    /// 促銷價
    ///
    /// 百分比必須在 (0, 100] 之間；固定金額必須大於 0 且小於售價。
    pub fn promotional_price(&self, price: f64) -> Result<f64> {
        match *self {
            Discount::Percentage(pct) => {
                if !(pct > 0.0 && pct <= 100.0) {
                    return Err(CostError::InvalidDiscount(format!(
                        "百分比折扣必須介於 1% 與 100% 之間：{pct}"
                    )));
                }
                Ok(round2(price * (1.0 - pct / 100.0)))
            }
            Discount::Fixed(value) => {
                if !(value > 0.0) {
                    return Err(CostError::InvalidDiscount(format!(
                        "折扣金額必須大於 0：{value}"
                    )));
                }
                if value >= price {
                    return Err(CostError::InvalidDiscount(format!(
                        "折扣金額 {value} 不可大於或等於售價 {price}"
                    )));
                }
                Ok(round2(price - value))
            }
        }
    }

    /// 套用優惠券，結果不低於 0
    pub fn apply_coupon(&self, price: f64) -> f64 {
        match *self {
            Discount::Percentage(pct) => round2(price * (1.0 - pct / 100.0)),
            Discount::Fixed(value) => round2((price - value).max(0.0)),
        }
    }
}

/// 優惠券
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(flatten)]
    pub discount: Discount,

    #[serde(rename = "ativo")]
    pub active: bool,

    /// 最後有效日（含當天）
    #[serde(rename = "data_validade", default)]
    pub expires_on: Option<NaiveDate>,

    /// 使用上限；0 表示不限
    #[serde(rename = "limite_usos", default)]
    pub usage_limit: u32,

    #[serde(rename = "usos_realizados", default)]
    pub uses: u32,

    /// 限定的產品分類；空白表示全部適用
    #[serde(rename = "categorias", default)]
    pub categories: Vec<u64>,
}

impl Coupon {
    /// 創建啟用中、不限次數、不限分類的優惠券
    pub fn new(code: impl Into<String>, discount: Discount) -> Self {
        Self {
            code: code.into(),
            discount,
            active: true,
            expires_on: None,
            usage_limit: 0,
            uses: 0,
            categories: Vec::new(),
        }
    }

    /// 建構器模式：設置有效期限
    pub fn with_expiry(mut self, expires_on: NaiveDate) -> Self {
        self.expires_on = Some(expires_on);
        self
    }

    /// 建構器模式：設置使用上限
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = limit;
        self
    }

    /// 建構器模式：設置適用分類
    pub fn with_categories(mut self, categories: Vec<u64>) -> Self {
        self.categories = categories;
        self
    }

    /// 檢查在 `today` 對指定分類的產品是否可用
    ///
    /// 依序檢查：啟用、期限、使用次數、分類。`product_category` 為 `None`
    /// 時不檢查分類。
    pub fn validate(&self, today: NaiveDate, product_category: Option<u64>) -> Result<()> {
        if !self.active {
            return Err(CostError::CouponRejected(format!("{} 已停用", self.code)));
        }

        if let Some(expires_on) = self.expires_on {
            if expires_on < today {
                return Err(CostError::CouponRejected(format!(
                    "{} 已於 {expires_on} 過期",
                    self.code
                )));
            }
        }

        if self.usage_limit > 0 && self.uses >= self.usage_limit {
            return Err(CostError::CouponRejected(format!(
                "{} 已達使用上限 {}",
                self.code, self.usage_limit
            )));
        }

        if let Some(category) = product_category {
            if !self.categories.is_empty() && !self.categories.contains(&category) {
                return Err(CostError::CouponRejected(format!(
                    "{} 不適用於分類 {category}",
                    self.code
                )));
            }
        }

        Ok(())
    }

    /// 驗證後套用到售價並累計使用次數
    pub fn redeem(
        &mut self,
        price: f64,
        today: NaiveDate,
        product_category: Option<u64>,
    ) -> Result<f64> {
        self.validate(today, product_category)?;
        self.uses += 1;

        let final_price = self.discount.apply_coupon(price);
        tracing::debug!(code = %self.code, price, final_price, uses = self.uses, "優惠券已使用");
        Ok(final_price)
    }
}

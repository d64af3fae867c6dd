//! 基本成本計算
//!
//! 由重量與列印時間推算成本明細與建議售價：
//!
//! ```text
//! 材料   = (重量_g / 1000) × 每公斤成本
//! 機器   = 時數 × 機器每小時成本
//! 電力   = 時數 × 電價
//! 折舊   = (材料 + 機器 + 電力) × 折舊比例
//! 小計   = 材料 + 機器 + 電力 + 折舊
//! 失敗   = 小計 × 失敗比例
//! 總成本 = 小計 + 失敗
//! 售價   = 總成本 × (1 + 利潤率)
//! ```
//!
//! 所有中間值保持完整精度，只有輸出欄位各自捨入一次。

use printcost_core::{round2, Settings};
use serde::{Deserialize, Serialize};

use crate::depreciation::{self, DepreciationBasis};
use crate::MarginHealth;

/// 成本明細（已捨入到分）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "custoMaterial")]
    pub material_cost: f64,
    #[serde(rename = "custoMaquina")]
    pub machine_cost: f64,
    #[serde(rename = "custoEnergia")]
    pub energy_cost: f64,
    #[serde(rename = "custoDepreciacao")]
    pub depreciation_cost: f64,
    #[serde(rename = "custoFalhas")]
    pub failure_cost: f64,
    #[serde(rename = "custoTotal")]
    pub total_cost: f64,
    #[serde(rename = "precoVenda")]
    pub sale_price: f64,
    #[serde(rename = "lucroEstimado")]
    pub estimated_profit: f64,
    /// 利潤佔售價的百分比（不是對成本的加成）
    #[serde(rename = "margemReal")]
    pub real_margin: f64,
}

impl CostBreakdown {
    /// 折舊基礎
    pub fn depreciation_basis(&self) -> DepreciationBasis {
        DepreciationBasis::DirectCosts
    }

    /// 利潤率健康度
    pub fn margin_health(&self) -> MarginHealth {
        MarginHealth::classify(self.real_margin)
    }
}

/// 基本成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 計算成本明細
    ///
    /// `margin_override` 為 `None` 時使用 `settings.default_margin`。
    /// 不做輸入驗證：零或負值會得到退化但確定的結果。
    pub fn calculate(
        settings: &Settings,
        weight_g: f64,
        print_time_h: f64,
        margin_override: Option<f64>,
    ) -> CostBreakdown {
        // 直接成本
        let material = (weight_g / 1000.0) * settings.cost_per_kg;
        let machine = print_time_h * settings.machine_hour_cost;
        let energy = print_time_h * settings.energy_cost_per_kwh;

        let depreciation = depreciation::over_direct_costs(
            material,
            machine,
            energy,
            settings.depreciation_rate,
        );

        let subtotal = material + machine + energy + depreciation;
        let failures = subtotal * settings.failure_rate;
        let total = subtotal + failures;

        let margin = margin_override.unwrap_or(settings.default_margin);
        let sale_price = total * (1.0 + margin);
        let profit = sale_price - total;
        let real_margin = if sale_price > 0.0 {
            ((sale_price - total) / sale_price) * 100.0
        } else {
            0.0
        };

        tracing::debug!(
            weight_g,
            print_time_h,
            margin,
            total,
            sale_price,
            "成本計算完成"
        );

        CostBreakdown {
            material_cost: round2(material),
            machine_cost: round2(machine),
            energy_cost: round2(energy),
            depreciation_cost: round2(depreciation),
            failure_cost: round2(failures),
            total_cost: round2(total),
            sale_price: round2(sale_price),
            estimated_profit: round2(profit),
            real_margin: round2(real_margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_reference_scenario() {
        let settings = Settings::default();
        let result = CostCalculator::calculate(&settings, 150.0, 3.5, None);

        assert_eq!(result.material_cost, 18.00);
        assert_eq!(result.machine_cost, 17.50);
        // 2.975 只在輸出時捨入
        assert_eq!(result.energy_cost, 2.98);
        assert_eq!(result.depreciation_cost, 3.85);
        assert_eq!(result.failure_cost, 2.12);
        assert_eq!(result.total_cost, 44.44);
        assert_eq!(result.sale_price, 66.66);
        assert_eq!(result.estimated_profit, 22.22);
        assert_eq!(result.real_margin, 33.33);
    }

    #[test]
    fn test_rounding_not_cascaded() {
        // 若先捨入再相加：18 + 17.5 + 2.98 + 3.85 + 2.12 = 44.45
        let result = CostCalculator::calculate(&Settings::default(), 150.0, 3.5, None);
        let cascaded = result.material_cost
            + result.machine_cost
            + result.energy_cost
            + result.depreciation_cost
            + result.failure_cost;

        assert_eq!(round2(cascaded), 44.45);
        assert_eq!(result.total_cost, 44.44);
    }

    #[test]
    fn test_margin_override() {
        let settings = Settings::default();
        let result = CostCalculator::calculate(&settings, 150.0, 3.5, Some(0.25));

        assert_eq!(result.total_cost, 44.44);
        assert_eq!(result.sale_price, 55.55);
        assert_eq!(result.estimated_profit, 11.11);
        assert_eq!(result.real_margin, 20.0);
    }

    #[test]
    fn test_zero_override_is_not_ignored() {
        let result = CostCalculator::calculate(&Settings::default(), 150.0, 3.5, Some(0.0));

        assert_eq!(result.sale_price, result.total_cost);
        assert_eq!(result.estimated_profit, 0.0);
        assert_eq!(result.real_margin, 0.0);
    }

    #[test]
    fn test_zero_inputs_degenerate() {
        let result = CostCalculator::calculate(&Settings::default(), 0.0, 0.0, None);

        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.sale_price, 0.0);
        assert_eq!(result.real_margin, 0.0);
    }

    #[rstest]
    #[case(80.0, 2.0, 24.60, 36.90)]
    #[case(230.0, 6.25, 74.11, 111.16)]
    #[case(45.5, 1.2, 14.41, 21.62)]
    fn test_catalog_examples(
        #[case] weight: f64,
        #[case] hours: f64,
        #[case] total: f64,
        #[case] price: f64,
    ) {
        let result = CostCalculator::calculate(&Settings::default(), weight, hours, None);
        assert_eq!(result.total_cost, total);
        assert_eq!(result.sale_price, price);
    }

    #[test]
    fn test_settings_change_moves_prices() {
        let settings = Settings::default().with_cost_per_kg(150.0);
        let result = CostCalculator::calculate(&settings, 150.0, 3.5, None);

        assert_eq!(result.material_cost, 22.50);
        assert_eq!(result.total_cost, 49.64);
        assert_eq!(result.sale_price, 74.45);
    }

    #[test]
    fn test_margin_health() {
        let settings = Settings::default();
        let healthy = CostCalculator::calculate(&settings, 150.0, 3.5, None);
        let low = CostCalculator::calculate(&settings, 150.0, 3.5, Some(0.1));

        assert_eq!(healthy.margin_health(), MarginHealth::Healthy);
        assert_eq!(low.margin_health(), MarginHealth::Low);
        assert_eq!(healthy.depreciation_basis(), DepreciationBasis::DirectCosts);
    }

    #[test]
    fn test_breakdown_serde_keys() {
        let result = CostCalculator::calculate(&Settings::default(), 150.0, 3.5, None);
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"custoTotal\":44.44"));
        assert!(json.contains("\"precoVenda\":66.66"));
        assert!(json.contains("\"margemReal\":33.33"));
    }
}

//! 線材計算器
//!
//! 由線材幾何（直徑、密度、長度）與列印分鐘數推算重量與時數，
//! 再套用另一套成本公式：電力依功耗計算、折舊以機器工時為基礎、
//! 沒有獨立的機器成本項，並可加上後製與其他附加成本。

use std::f64::consts::PI;

use printcost_core::{round2, ProductDraft, Settings};
use serde::{Deserialize, Serialize};

use crate::depreciation::{self, DepreciationBasis};
use crate::MarginHealth;

/// 預設線材直徑（mm）
pub const DEFAULT_FILAMENT_DIAMETER_MM: f64 = 1.75;

/// 預設線材密度（g/cm³，PLA）
pub const DEFAULT_FILAMENT_DENSITY: f64 = 1.24;

/// 線材計算器輸入
///
/// 所有比例以小數表示（0.1 = 10%）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedInput {
    /// 線材長度（公尺）
    pub filament_length_m: f64,
    /// 線材直徑（mm）
    pub filament_diameter_mm: f64,
    /// 線材密度（g/cm³）
    pub filament_density: f64,
    /// 列印時間（分鐘）
    pub print_time_min: f64,

    pub cost_per_kg: f64,
    pub energy_cost_per_kwh: f64,
    pub machine_power_w: f64,
    pub machine_hour_cost: f64,
    pub depreciation_rate: f64,
    pub failure_rate: f64,

    /// 建模工時（固定金額）
    pub modeling_cost: f64,
    /// 後製比例（以基礎成本計）
    pub finishing_rate: f64,
    /// 固定件（固定金額）
    pub fixture_cost: f64,
    /// 其他（固定金額）
    pub other_cost: f64,

    /// 利潤率
    pub margin: f64,
}

impl AdvancedInput {
    /// 以目前設定預填費率與利潤率，線材使用預設規格，其餘為 0
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            filament_length_m: 0.0,
            filament_diameter_mm: DEFAULT_FILAMENT_DIAMETER_MM,
            filament_density: DEFAULT_FILAMENT_DENSITY,
            print_time_min: 0.0,
            cost_per_kg: settings.cost_per_kg,
            energy_cost_per_kwh: settings.energy_cost_per_kwh,
            machine_power_w: settings.effective_machine_power_w(),
            machine_hour_cost: settings.machine_hour_cost,
            depreciation_rate: settings.depreciation_rate,
            failure_rate: settings.failure_rate,
            modeling_cost: 0.0,
            finishing_rate: 0.0,
            fixture_cost: 0.0,
            other_cost: 0.0,
            margin: settings.default_margin,
        }
    }

    /// 建構器模式：設置線材長度與列印分鐘數
    pub fn with_job(mut self, filament_length_m: f64, print_time_min: f64) -> Self {
        self.filament_length_m = filament_length_m;
        self.print_time_min = print_time_min;
        self
    }

    /// 建構器模式：設置線材規格
    pub fn with_filament(mut self, diameter_mm: f64, density: f64) -> Self {
        self.filament_diameter_mm = diameter_mm;
        self.filament_density = density;
        self
    }

    /// 建構器模式：設置附加成本
    pub fn with_extras(
        mut self,
        modeling_cost: f64,
        finishing_rate: f64,
        fixture_cost: f64,
        other_cost: f64,
    ) -> Self {
        self.modeling_cost = modeling_cost;
        self.finishing_rate = finishing_rate;
        self.fixture_cost = fixture_cost;
        self.other_cost = other_cost;
        self
    }

    /// 建構器模式：設置利潤率
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// 呼叫端正規化：負值與 NaN 一律視為 0
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.max(0.0) };
        Self {
            filament_length_m: c(self.filament_length_m),
            filament_diameter_mm: c(self.filament_diameter_mm),
            filament_density: c(self.filament_density),
            print_time_min: c(self.print_time_min),
            cost_per_kg: c(self.cost_per_kg),
            energy_cost_per_kwh: c(self.energy_cost_per_kwh),
            machine_power_w: c(self.machine_power_w),
            machine_hour_cost: c(self.machine_hour_cost),
            depreciation_rate: c(self.depreciation_rate),
            failure_rate: c(self.failure_rate),
            modeling_cost: c(self.modeling_cost),
            finishing_rate: c(self.finishing_rate),
            fixture_cost: c(self.fixture_cost),
            other_cost: c(self.other_cost),
            margin: c(self.margin),
        }
    }
}

/// 線材幾何推算結果（未捨入）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilamentGeometry {
    pub radius_mm: f64,
    pub area_mm2: f64,
    pub area_cm2: f64,
    pub length_cm: f64,
    pub volume_cm3: f64,
    pub weight_g: f64,
    pub print_time_h: f64,
}

impl FilamentGeometry {
    /// 由線材規格推算體積、重量與時數
    pub fn from_filament(
        diameter_mm: f64,
        density: f64,
        length_m: f64,
        print_time_min: f64,
    ) -> Self {
        let radius_mm = diameter_mm / 2.0;
        let area_mm2 = PI * radius_mm * radius_mm;
        // 1 cm² = 100 mm²
        let area_cm2 = area_mm2 / 100.0;
        let length_cm = length_m * 100.0;
        let volume_cm3 = area_cm2 * length_cm;
        let weight_g = volume_cm3 * density;
        let print_time_h = print_time_min / 60.0;

        Self {
            radius_mm,
            area_mm2,
            area_cm2,
            length_cm,
            volume_cm3,
            weight_g,
            print_time_h,
        }
    }
}

/// 線材計算器結果
///
/// 幾何與用電量保持完整精度，金額與利潤率捨入到兩位。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedBreakdown {
    pub geometry: FilamentGeometry,
    pub energy_kwh: f64,

    pub material_cost: f64,
    pub energy_cost: f64,
    pub depreciation_cost: f64,
    pub subtotal: f64,
    pub failure_cost: f64,
    pub base_cost: f64,

    pub modeling_cost: f64,
    pub finishing_cost: f64,
    pub fixture_cost: f64,
    pub other_cost: f64,
    pub total_extras: f64,

    pub production_cost: f64,
    pub sale_price: f64,
    pub profit: f64,
    /// 利潤佔售價的百分比
    pub real_margin: f64,
    /// 以未捨入的生產成本與利潤率判定；生產成本為 0 時不警告
    pub margin_health: MarginHealth,
}

impl AdvancedBreakdown {
    /// 折舊基礎
    pub fn depreciation_basis(&self) -> DepreciationBasis {
        DepreciationBasis::MachineHours
    }

    /// 轉為產品表單，重量與時數捨入到兩位
    pub fn to_draft(&self, name: impl Into<String>) -> ProductDraft {
        ProductDraft::new(
            name,
            round2(self.geometry.weight_g),
            round2(self.geometry.print_time_h),
        )
    }
}

/// 線材計算器
pub struct AdvancedCalculator;

impl AdvancedCalculator {
    /// 計算完整明細
    pub fn calculate(input: &AdvancedInput) -> AdvancedBreakdown {
        let geometry = FilamentGeometry::from_filament(
            input.filament_diameter_mm,
            input.filament_density,
            input.filament_length_m,
            input.print_time_min,
        );
        let hours = geometry.print_time_h;

        // 變動成本
        let material = (geometry.weight_g / 1000.0) * input.cost_per_kg;
        let energy_kwh = (input.machine_power_w / 1000.0) * hours;
        let energy = energy_kwh * input.energy_cost_per_kwh;
        let depreciation =
            depreciation::over_machine_hours(input.machine_hour_cost, hours, input.depreciation_rate);

        // 沒有獨立機器成本項，機器只透過折舊計入
        let subtotal = material + energy + depreciation;
        let failures = subtotal * input.failure_rate;

        // 附加成本
        let base = subtotal + failures;
        let finishing = base * input.finishing_rate;
        let extras = input.modeling_cost + finishing + input.fixture_cost + input.other_cost;

        let production = base + extras;
        let sale_price = production * (1.0 + input.margin);
        let profit = sale_price - production;
        let real_margin = if sale_price > 0.0 {
            (sale_price - production) / sale_price * 100.0
        } else {
            0.0
        };
        let margin_health = if production > 0.0 {
            MarginHealth::classify(real_margin)
        } else {
            MarginHealth::Healthy
        };

        tracing::debug!(
            weight_g = geometry.weight_g,
            print_time_h = hours,
            production,
            sale_price,
            "線材成本計算完成"
        );

        AdvancedBreakdown {
            geometry,
            energy_kwh,
            material_cost: round2(material),
            energy_cost: round2(energy),
            depreciation_cost: round2(depreciation),
            subtotal: round2(subtotal),
            failure_cost: round2(failures),
            base_cost: round2(base),
            modeling_cost: round2(input.modeling_cost),
            finishing_cost: round2(finishing),
            fixture_cost: round2(input.fixture_cost),
            other_cost: round2(input.other_cost),
            total_extras: round2(extras),
            production_cost: round2(production),
            sale_price: round2(sale_price),
            profit: round2(profit),
            real_margin: round2(real_margin),
            margin_health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_geometry_reference() {
        let geometry = FilamentGeometry::from_filament(1.75, 1.24, 2.0, 60.0);

        assert_eq!(geometry.radius_mm, 0.875);
        assert!(close(geometry.area_mm2, 2.4053, 1e-4));
        assert!(close(geometry.area_cm2, 0.024053, 1e-6));
        assert_eq!(geometry.length_cm, 200.0);
        assert!(close(geometry.volume_cm3, 4.8106, 1e-4));
        assert!(close(geometry.weight_g, 5.966, 1e-3));
        assert_eq!(geometry.print_time_h, 1.0);
    }

    #[test]
    fn test_reference_job_with_default_rates() {
        let input = AdvancedInput::from_settings(&Settings::default()).with_job(2.0, 60.0);
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.material_cost, 0.72);
        assert!(close(result.energy_kwh, 0.35, 1e-12));
        assert_eq!(result.energy_cost, 0.30);
        // 5 × 1 h × 10%
        assert_eq!(result.depreciation_cost, 0.50);
        assert_eq!(result.subtotal, 1.51);
        assert_eq!(result.failure_cost, 0.08);
        assert_eq!(result.base_cost, 1.59);
        assert_eq!(result.total_extras, 0.0);
        assert_eq!(result.production_cost, 1.59);
        assert_eq!(result.sale_price, 2.38);
        assert_eq!(result.profit, 0.79);
        assert_eq!(result.real_margin, 33.33);
        assert_eq!(result.depreciation_basis(), DepreciationBasis::MachineHours);
    }

    #[test]
    fn test_extras_layered_on_base_cost() {
        let input = AdvancedInput::from_settings(&Settings::default())
            .with_job(100.0, 240.0)
            .with_extras(10.0, 0.10, 2.0, 1.0);
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.material_cost, 35.79);
        assert_eq!(result.energy_cost, 1.19);
        assert_eq!(result.depreciation_cost, 2.0);
        assert_eq!(result.base_cost, 40.93);
        assert_eq!(result.finishing_cost, 4.09);
        assert_eq!(result.total_extras, 17.09);
        assert_eq!(result.production_cost, 58.02);
        assert_eq!(result.sale_price, 87.03);
        assert_eq!(result.profit, 29.01);
    }

    #[test]
    fn test_differs_from_base_pipeline() {
        // 同樣的重量與時數，兩套公式結果不同
        let settings = Settings::default();
        let input = AdvancedInput::from_settings(&settings).with_job(2.0, 60.0);
        let advanced = AdvancedCalculator::calculate(&input);
        let base = crate::CostCalculator::calculate(
            &settings,
            advanced.geometry.weight_g,
            advanced.geometry.print_time_h,
            None,
        );

        assert_ne!(advanced.depreciation_cost, base.depreciation_cost);
        assert_ne!(advanced.production_cost, base.total_cost);
    }

    #[test]
    fn test_empty_job() {
        let input = AdvancedInput::from_settings(&Settings::default());
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.geometry.weight_g, 0.0);
        assert_eq!(result.production_cost, 0.0);
        assert_eq!(result.sale_price, 0.0);
        assert_eq!(result.real_margin, 0.0);
        // 沒有成本時不發出低利潤警告
        assert_eq!(result.margin_health, MarginHealth::Healthy);
    }

    #[test]
    fn test_low_margin_warning() {
        let input = AdvancedInput::from_settings(&Settings::default())
            .with_job(2.0, 60.0)
            .with_margin(0.1);
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.margin_health, MarginHealth::Low);
    }

    #[test]
    fn test_low_margin_judged_before_rounding() {
        // 0.24994 / 1.24994 ≈ 19.996%，顯示為 20.00 但仍低於門檻
        let input = AdvancedInput::from_settings(&Settings::default())
            .with_job(2.0, 60.0)
            .with_margin(0.24994);
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.real_margin, 20.0);
        assert_eq!(result.margin_health, MarginHealth::Low);
    }

    #[test]
    fn test_sub_cent_production_cost_still_warns() {
        let input = AdvancedInput::from_settings(&Settings::default())
            .with_extras(0.0, 0.0, 0.0, 0.004)
            .with_margin(0.0);
        let result = AdvancedCalculator::calculate(&input);

        assert_eq!(result.production_cost, 0.0);
        assert_eq!(result.margin_health, MarginHealth::Low);
    }

    #[test]
    fn test_prefill_power_falls_back_when_unset() {
        let settings = Settings::default().with_machine_power_w(0.0);
        let input = AdvancedInput::from_settings(&settings);

        assert_eq!(input.machine_power_w, 350.0);
        let result = AdvancedCalculator::calculate(&input.with_job(2.0, 60.0));
        assert!(close(result.energy_kwh, 0.35, 1e-12));
    }

    #[test]
    fn test_clamped_inputs() {
        let input = AdvancedInput::from_settings(&Settings::default())
            .with_job(-5.0, f64::NAN)
            .with_extras(-1.0, 0.2, -3.0, 4.0)
            .clamped();

        assert_eq!(input.filament_length_m, 0.0);
        assert_eq!(input.print_time_min, 0.0);
        assert_eq!(input.modeling_cost, 0.0);
        assert_eq!(input.finishing_rate, 0.2);
        assert_eq!(input.fixture_cost, 0.0);
        assert_eq!(input.other_cost, 4.0);
    }

    #[test]
    fn test_to_draft_rounds_inputs() {
        let input = AdvancedInput::from_settings(&Settings::default()).with_job(2.0, 50.0);
        let draft = AdvancedCalculator::calculate(&input).to_draft("Chaveiro");

        assert_eq!(draft.name, "Chaveiro");
        assert_eq!(draft.weight_g, 5.97);
        // 50 分鐘 = 0.8333 h
        assert_eq!(draft.print_time_h, 0.83);
    }
}

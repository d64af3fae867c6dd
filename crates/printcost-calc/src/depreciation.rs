//! 折舊計算
//!
//! 基本計算器與線材計算器使用不同的折舊基礎，兩者不可互換。

use serde::{Deserialize, Serialize};

/// 折舊基礎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepreciationBasis {
    /// 以直接成本（材料 + 機器 + 電力）為基礎
    DirectCosts,
    /// 以機器工時成本為基礎
    MachineHours,
}

/// 直接成本折舊：`(材料 + 機器 + 電力) × 比例`
pub fn over_direct_costs(material: f64, machine: f64, energy: f64, rate: f64) -> f64 {
    (material + machine + energy) * rate
}

/// 機器工時折舊：`每小時成本 × 時數 × 比例`
pub fn over_machine_hours(machine_hour_cost: f64, hours: f64, rate: f64) -> f64 {
    machine_hour_cost * hours * rate
}

//! 成本參數配置

use serde::{Deserialize, Serialize};

/// 預設機器功耗（瓦）
pub const DEFAULT_MACHINE_POWER_W: f64 = 350.0;

/// 全域成本參數
///
/// 首次執行時使用 [`Settings::default`]，之後每次儲存設定表單時整筆覆寫。
/// 序列化欄位名稱沿用既有資料檔的鍵名。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// 預設利潤率（加在成本上的倍率，0.5 = 50%）
    #[serde(rename = "margem_padrao")]
    pub default_margin: f64,

    /// 線材每公斤成本
    #[serde(rename = "custo_kg")]
    pub cost_per_kg: f64,

    /// 機器每小時成本
    #[serde(rename = "custo_hora_maquina")]
    pub machine_hour_cost: f64,

    /// 每度電價格
    #[serde(rename = "custo_kwh")]
    pub energy_cost_per_kwh: f64,

    /// 機器功耗（瓦）
    #[serde(rename = "consumo_maquina_w", default = "default_machine_power")]
    pub machine_power_w: f64,

    /// 失敗附加比例
    #[serde(rename = "percentual_falha")]
    pub failure_rate: f64,

    /// 折舊附加比例
    #[serde(rename = "depreciacao_percentual")]
    pub depreciation_rate: f64,
}

fn default_machine_power() -> f64 {
    DEFAULT_MACHINE_POWER_W
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_margin: 0.50,
            cost_per_kg: 120.0,
            machine_hour_cost: 5.0,
            energy_cost_per_kwh: 0.85,
            machine_power_w: DEFAULT_MACHINE_POWER_W,
            failure_rate: 0.05,
            depreciation_rate: 0.10,
        }
    }
}

impl Settings {
    /// 實際使用的機器功耗；未設定（0 或 NaN）時為 350 W
    pub fn effective_machine_power_w(&self) -> f64 {
        power_or_default(self.machine_power_w)
    }

    /// 建構器模式：設置預設利潤率
    pub fn with_default_margin(mut self, margin: f64) -> Self {
        self.default_margin = margin;
        self
    }

    /// 建構器模式：設置線材每公斤成本
    pub fn with_cost_per_kg(mut self, cost: f64) -> Self {
        self.cost_per_kg = cost;
        self
    }

    /// 建構器模式：設置機器每小時成本
    pub fn with_machine_hour_cost(mut self, cost: f64) -> Self {
        self.machine_hour_cost = cost;
        self
    }

    /// 建構器模式：設置電價
    pub fn with_energy_cost_per_kwh(mut self, cost: f64) -> Self {
        self.energy_cost_per_kwh = cost;
        self
    }

    /// 建構器模式：設置機器功耗
    pub fn with_machine_power_w(mut self, watts: f64) -> Self {
        self.machine_power_w = watts;
        self
    }

    /// 建構器模式：設置失敗附加比例
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    /// 建構器模式：設置折舊附加比例
    pub fn with_depreciation_rate(mut self, rate: f64) -> Self {
        self.depreciation_rate = rate;
        self
    }
}

/// 設定表單的原始輸入
///
/// 引擎本身不做驗證，數值正規化由呼叫端負責：
/// 無法解析或空白的欄位一律視為 `0`，機器功耗為 `0` 時改用 350 W。
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub default_margin: String,
    pub cost_per_kg: String,
    pub machine_hour_cost: String,
    pub energy_cost_per_kwh: String,
    pub machine_power_w: String,
    pub failure_rate: String,
    pub depreciation_rate: String,
}

impl SettingsForm {
    /// 轉換為 [`Settings`]，永不失敗
    pub fn into_settings(self) -> Settings {
        let machine_power_w = power_or_default(coerce_number(&self.machine_power_w));

        Settings {
            default_margin: coerce_number(&self.default_margin),
            cost_per_kg: coerce_number(&self.cost_per_kg),
            machine_hour_cost: coerce_number(&self.machine_hour_cost),
            energy_cost_per_kwh: coerce_number(&self.energy_cost_per_kwh),
            machine_power_w,
            failure_rate: coerce_number(&self.failure_rate),
            depreciation_rate: coerce_number(&self.depreciation_rate),
        }
    }
}

fn power_or_default(watts: f64) -> f64 {
    if watts == 0.0 || watts.is_nan() {
        DEFAULT_MACHINE_POWER_W
    } else {
        watts
    }
}

/// 將表單文字轉為數值
///
/// 取開頭最長的數字前綴（`"12abc"` → 12，`"0,85"` → 0）；
/// 沒有數字前綴或結果非有限值時回傳 `0`。
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

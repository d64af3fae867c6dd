//! 資料快照（JSON）
//!
//! 沿用既有備份檔的工作表結構：`SETTINGS` 為單筆陣列，`PRODUCTS` 為產品清單。

use printcost_core::{CostError, Product, ProductStore, Result, Settings, SettingsStore};
use serde::{Deserialize, Serialize};

/// 設定與產品目錄的快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "SETTINGS", default)]
    pub settings: Vec<Settings>,

    #[serde(rename = "PRODUCTS", default)]
    pub products: Vec<Product>,
}

impl Snapshot {
    /// 從儲存層擷取快照
    pub fn capture<S: SettingsStore, P: ProductStore>(settings: &S, products: &P) -> Result<Self> {
        Ok(Self {
            settings: vec![settings.get()],
            products: products.list()?,
        })
    }

    /// 快照中的設定；沒有設定時為預設值
    pub fn effective_settings(&self) -> Settings {
        self.settings.first().copied().unwrap_or_default()
    }

    /// 寫回儲存層
    ///
    /// 快照沒有設定時不覆寫既有設定。
    pub fn restore_into<S: SettingsStore, P: ProductStore>(
        &self,
        settings: &S,
        products: &P,
    ) -> Result<()> {
        if let Some(first) = self.settings.first() {
            settings.set(*first)?;
        }
        products.replace_all(self.products.clone())?;

        tracing::info!("快照已還原: {} 個產品", self.products.len());
        Ok(())
    }

    /// 序列化為 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CostError::Serialization(e.to_string()))
    }

    /// 從 JSON 解析
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CostError::Serialization(e.to_string()))
    }
}

//! 記憶體儲存

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use printcost_core::{CostError, Product, ProductStore, Result, Settings, SettingsStore};

/// 記憶體設定儲存
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Option<Settings>>,
}

impl MemorySettingsStore {
    /// 創建空的設定儲存（讀取時回傳預設值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有設定創建
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }

    /// 是否已儲存過設定
    pub fn is_initialized(&self) -> bool {
        self.settings
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self) -> Settings {
        let guard = self
            .settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (*guard).unwrap_or_default()
    }

    fn set(&self, settings: Settings) -> Result<()> {
        let mut guard = self
            .settings
            .write()
            .map_err(|e| CostError::Storage(format!("設定鎖定失敗: {e}")))?;
        *guard = Some(settings);
        Ok(())
    }
}

/// 記憶體產品儲存
///
/// `replace_all` 以單次寫入替換整個清單。
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
    fail_writes: AtomicBool,
}

impl MemoryProductStore {
    /// 創建空的產品儲存
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有產品創建
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// 模擬寫入失敗（測試寫入失敗路徑用）
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 產品數量
    pub fn len(&self) -> usize {
        self.products.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProductStore for MemoryProductStore {
    fn list(&self) -> Result<Vec<Product>> {
        self.products
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| CostError::Storage(format!("產品鎖定失敗: {e}")))
    }

    fn replace_all(&self, products: Vec<Product>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CostError::Storage("產品儲存無法寫入".to_string()));
        }

        let mut guard = self
            .products
            .write()
            .map_err(|e| CostError::Storage(format!("產品鎖定失敗: {e}")))?;
        *guard = products;

        tracing::debug!("產品目錄已寫入: {} 筆", guard.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_when_unset() {
        let store = MemorySettingsStore::new();

        assert!(!store.is_initialized());
        assert_eq!(store.get(), Settings::default());
    }

    #[test]
    fn test_settings_overwritten_wholesale() {
        let store = MemorySettingsStore::new();
        let settings = Settings::default().with_cost_per_kg(150.0).with_failure_rate(0.0);

        store.set(settings).unwrap();

        assert!(store.is_initialized());
        assert_eq!(store.get(), settings);
    }

    #[test]
    fn test_replace_all() {
        let store = MemoryProductStore::new();
        assert!(store.is_empty());

        store
            .replace_all(vec![
                Product::new(1, "A".to_string(), 10.0, 1.0),
                Product::new(2, "B".to_string(), 20.0, 2.0),
            ])
            .unwrap();
        assert_eq!(store.len(), 2);

        store
            .replace_all(vec![Product::new(3, "C".to_string(), 30.0, 3.0)])
            .unwrap();
        let products = store.list().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 3);
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let store = MemoryProductStore::with_products(vec![Product::new(
            1,
            "A".to_string(),
            10.0,
            1.0,
        )]);

        store.fail_writes(true);
        let err = store.replace_all(Vec::new()).unwrap_err();

        assert!(matches!(err, CostError::Storage(_)));
        assert_eq!(store.len(), 1);
    }
}

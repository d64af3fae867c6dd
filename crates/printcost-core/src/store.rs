//! 儲存層介面
//!
//! 成本引擎只透過這兩個 trait 讀寫設定與產品，實際儲存方式由實作決定。

use crate::{Product, Result, Settings};

/// 全域設定儲存
pub trait SettingsStore {
    /// 讀取目前設定；尚未儲存過時回傳預設值，永不失敗
    fn get(&self) -> Settings;

    /// 整筆覆寫設定
    fn set(&self, settings: Settings) -> Result<()>;
}

/// 產品目錄儲存
pub trait ProductStore {
    /// 列出所有產品
    fn list(&self) -> Result<Vec<Product>>;

    /// 以新清單整批取代目錄
    ///
    /// 實作必須是一次性寫入：失敗時原目錄保持不變。
    fn replace_all(&self, products: Vec<Product>) -> Result<()>;
}

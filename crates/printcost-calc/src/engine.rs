//! 成本引擎主入口
//!
//! 串接設定儲存、產品儲存與兩套計算器。

use chrono::Utc;
use printcost_core::{CostError, Product, ProductDraft, ProductStore, Settings, SettingsStore};

use crate::{
    AdvancedBreakdown, AdvancedCalculator, AdvancedInput, CostBreakdown, CostCalculator,
    RecalculationReport,
};

/// 成本引擎
pub struct CostEngine<S, P> {
    /// 設定儲存
    settings: S,

    /// 產品儲存
    products: P,
}

impl<S: SettingsStore, P: ProductStore> CostEngine<S, P> {
    /// 創建新的成本引擎
    pub fn new(settings: S, products: P) -> Self {
        Self { settings, products }
    }

    /// 目前生效的設定；未儲存過時為預設值
    pub fn get_effective_settings(&self) -> Settings {
        self.settings.get()
    }

    /// 以目前設定計算成本明細
    pub fn compute_cost(
        &self,
        weight_g: f64,
        print_time_h: f64,
        margin_override: Option<f64>,
    ) -> CostBreakdown {
        let settings = self.get_effective_settings();
        CostCalculator::calculate(&settings, weight_g, print_time_h, margin_override)
    }

    /// 以目前設定預填的線材計算器輸入
    pub fn advanced_input(&self) -> AdvancedInput {
        AdvancedInput::from_settings(&self.get_effective_settings())
    }

    /// 線材計算器
    pub fn compute_advanced(&self, input: &AdvancedInput) -> AdvancedBreakdown {
        AdvancedCalculator::calculate(input)
    }

    /// 以目前設定重算所有產品的成本與售價
    ///
    /// 先在記憶體中建立完整的新清單，再一次寫回；寫入失敗時目錄保持原狀。
    /// 一律使用預設利潤率，重量與時數不變。
    pub fn recalculate_all_products(&self) -> printcost_core::Result<RecalculationReport> {
        let start_time = std::time::Instant::now();
        let settings = self.get_effective_settings();

        let products = self
            .products
            .list()
            .map_err(|e| CostError::RecalculationFailed(e.to_string()))?;

        tracing::debug!("開始重算 {} 個產品", products.len());

        let updated: Vec<Product> = products
            .into_iter()
            .map(|mut product| {
                let breakdown = CostCalculator::calculate(
                    &settings,
                    product.weight_g,
                    product.print_time_h,
                    None,
                );
                product.apply_pricing(breakdown.total_cost, breakdown.sale_price);
                product
            })
            .collect();

        self.products.replace_all(updated.clone()).map_err(|e| {
            tracing::error!("重算結果寫入失敗: {}", e);
            CostError::RecalculationFailed(e.to_string())
        })?;

        let mut report = RecalculationReport::new(updated);
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            run_id = %report.run_id,
            "{} 個產品已重新計算，耗時 {:?}",
            report.count(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// 儲存新設定並重算整個目錄
    pub fn update_settings(
        &self,
        settings: Settings,
    ) -> printcost_core::Result<RecalculationReport> {
        self.settings.set(settings)?;
        tracing::info!("設定已更新");
        self.recalculate_all_products()
    }

    /// 驗證並儲存產品；`existing_id` 為 `None` 時新增
    pub fn save_product(
        &self,
        draft: &ProductDraft,
        existing_id: Option<u64>,
    ) -> printcost_core::Result<Product> {
        draft.validate()?;

        let breakdown = self.compute_cost(draft.weight_g, draft.print_time_h, None);
        self.store_product(draft, existing_id, breakdown.total_cost, breakdown.sale_price)
    }

    /// 將線材計算器結果存為新產品
    ///
    /// 快取的成本與售價取自線材計算器；下次全目錄重算時會改用基本公式。
    pub fn save_advanced_product(
        &self,
        name: &str,
        breakdown: &AdvancedBreakdown,
    ) -> printcost_core::Result<Product> {
        let draft = breakdown.to_draft(name);
        draft.validate()?;

        self.store_product(&draft, None, breakdown.production_cost, breakdown.sale_price)
    }

    fn store_product(
        &self,
        draft: &ProductDraft,
        existing_id: Option<u64>,
        total_cost: f64,
        sale_price: f64,
    ) -> printcost_core::Result<Product> {
        let mut products = self.products.list()?;

        let saved = match existing_id {
            Some(id) => {
                let product = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(CostError::ProductNotFound(id))?;
                product.name = draft.name.trim().to_string();
                product.weight_g = draft.weight_g;
                product.print_time_h = draft.print_time_h;
                product.created_at = Utc::now();
                product.apply_pricing(total_cost, sale_price);
                product.clone()
            }
            None => {
                let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
                let mut product = Product::new(
                    id,
                    draft.name.trim().to_string(),
                    draft.weight_g,
                    draft.print_time_h,
                );
                product.apply_pricing(total_cost, sale_price);
                products.push(product.clone());
                product
            }
        };

        self.products.replace_all(products)?;
        tracing::debug!("產品已儲存: {} ({})", saved.name, saved.id);

        Ok(saved)
    }

    /// 獲取設定儲存引用
    pub fn settings_store(&self) -> &S {
        &self.settings
    }

    /// 獲取產品儲存引用
    pub fn product_store(&self) -> &P {
        &self.products
    }
}

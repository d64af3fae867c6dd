//! 設定變更後全目錄重算示例

use printcost::{
    format_currency, CostEngine, MemoryProductStore, MemorySettingsStore, ProductDraft,
    ProductStore, Settings,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 全目錄重算示例 ===\n");

    let engine = CostEngine::new(MemorySettingsStore::new(), MemoryProductStore::new());

    // 建立目錄
    for (name, weight, hours) in [("Vaso", 150.0, 3.5), ("Suporte", 80.0, 2.0), ("Luminária", 230.0, 6.25)] {
        engine.save_product(&ProductDraft::new(name, weight, hours), None)?;
    }
    print_catalog("原始價格", &engine.product_store().list()?);

    // 線材漲價
    let settings = Settings::default().with_cost_per_kg(150.0);
    let report = engine.update_settings(settings)?;

    println!("\n{} 個產品已重新計算（run {}）", report.count(), report.run_id);
    print_catalog("重算後價格", &report.products);

    Ok(())
}

fn print_catalog(title: &str, products: &[printcost::Product]) {
    println!("{title}:");
    for product in products {
        println!(
            "  #{} {:<10} 成本 {:>12}  售價 {:>12}  利潤率 {:.1}%",
            product.id,
            product.name,
            format_currency(product.total_cost),
            format_currency(product.sale_price),
            product.real_margin()
        );
    }
}

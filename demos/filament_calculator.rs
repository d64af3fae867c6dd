//! 線材計算器示例

use printcost::{
    format_currency, CostEngine, MemoryProductStore, MemorySettingsStore, ProductStore,
};

fn main() -> anyhow::Result<()> {
    println!("=== 線材計算器示例 ===\n");

    let engine = CostEngine::new(MemorySettingsStore::new(), MemoryProductStore::new());

    // 1.75 mm PETG，12 公尺線材，印 95 分鐘，另加建模與後製
    let input = engine
        .advanced_input()
        .with_filament(1.75, 1.27)
        .with_job(12.0, 95.0)
        .with_extras(15.0, 0.10, 3.5, 0.0)
        .clamped();
    let result = engine.compute_advanced(&input);

    let g = &result.geometry;
    println!("半徑:   {:.3} mm", g.radius_mm);
    println!("截面積: {:.4} mm² = {:.6} cm²", g.area_mm2, g.area_cm2);
    println!("體積:   {:.4} cm³", g.volume_cm3);
    println!("重量:   {:.2} g", g.weight_g);
    println!("時間:   {:.3} h", g.print_time_h);
    println!("用電:   {:.4} kWh\n", result.energy_kwh);

    println!("材料:     {}", format_currency(result.material_cost));
    println!("電力:     {}", format_currency(result.energy_cost));
    println!("折舊:     {}", format_currency(result.depreciation_cost));
    println!("失敗:     {}", format_currency(result.failure_cost));
    println!("附加成本: {}", format_currency(result.total_extras));
    println!("生產成本: {}", format_currency(result.production_cost));
    println!("售價:     {}", format_currency(result.sale_price));
    println!("利潤:     {}", format_currency(result.profit));
    println!("實際利潤率: {:.1}%", result.real_margin);
    if result.margin_health.is_low() {
        println!("  ⚠ 利潤率低於 20%");
    }

    let product = engine.save_advanced_product("Engrenagem", &result)?;
    println!(
        "\n已存為產品 #{} {}（目錄共 {} 筆）",
        product.id,
        product.name,
        engine.product_store().list()?.len()
    );

    Ok(())
}

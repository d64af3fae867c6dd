//! 單件報價示例

use printcost::{format_currency, CostCalculator, SaleQuote, Settings};

fn main() -> anyhow::Result<()> {
    println!("=== 單件報價示例 ===\n");

    let settings = Settings::default();
    let breakdown = CostCalculator::calculate(&settings, 150.0, 3.5, None);

    println!("材料:     {}", format_currency(breakdown.material_cost));
    println!("機器:     {}", format_currency(breakdown.machine_cost));
    println!("電力:     {}", format_currency(breakdown.energy_cost));
    println!("折舊:     {}", format_currency(breakdown.depreciation_cost));
    println!("失敗:     {}", format_currency(breakdown.failure_cost));
    println!("總成本:   {}", format_currency(breakdown.total_cost));
    println!("售價:     {}", format_currency(breakdown.sale_price));
    println!("預估利潤: {}", format_currency(breakdown.estimated_profit));
    println!("實際利潤率: {:.1}%", breakdown.real_margin);

    if breakdown.margin_health().is_low() {
        println!("  ⚠ 利潤率低於 20%");
    }

    // 10% 折扣的銷售報價
    let quote = SaleQuote::new(breakdown.sale_price, breakdown.total_cost, 10.0);
    println!("\n折扣 10%:");
    println!("  折扣金額: - {}", format_currency(quote.discount_value));
    println!("  成交金額: {}", format_currency(quote.final_value));
    println!("  利潤:     {}", format_currency(quote.profit));

    println!("\n{}", serde_json::to_string_pretty(&breakdown)?);

    Ok(())
}

//! # PrintCost
//!
//! 3D 列印成本計算與價格重算

pub use printcost_calc as calc;
pub use printcost_core as model;
pub use printcost_store as store;

pub use printcost_calc::{
    AdvancedBreakdown, AdvancedCalculator, AdvancedInput, CostBreakdown, CostCalculator,
    CostEngine, Coupon, Discount, MarginHealth, RecalculationReport, SaleQuote,
};
pub use printcost_core::{
    format_currency, round2, CostError, Product, ProductDraft, ProductStore, Settings,
    SettingsForm, SettingsStore,
};
pub use printcost_store::{MemoryProductStore, MemorySettingsStore, Snapshot};

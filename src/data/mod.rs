//! Static reference tables: investor profiles, goals, the stock universe and
//! strategy templates. Everything here is read-only.

pub mod goals;
pub mod investors;
pub mod stocks;
pub mod strategies;

pub use goals::{find_goal, Goal, GOALS};
pub use investors::{find_investor, InvestorType, INVESTOR_TYPES};
pub use stocks::{find_stock, sector_of, Sector, StockInfo, SECTORS};
pub use strategies::{template_for, PeriodPlan, SectorAllocation, StrategyLabels, StrategyTemplate};

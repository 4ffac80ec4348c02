//! Action IDs for the strategy dashboard.

pub const EDIT_SIP: u16 = 500;
pub const EDIT_TARGET: u16 = 501;
pub const SAVE_CONFIG: u16 = 502;
pub const NEW_JOURNEY: u16 = 503;
pub const PREV_PERIOD: u16 = 504;
pub const NEXT_PERIOD: u16 = 505;
pub const SAVE_ALLOCATION: u16 = 506;
pub const CAL_PREV: u16 = 507;
pub const CAL_NEXT: u16 = 508;

/// `PERIOD_BASE + n` selects period `n` (0 = overview).
pub const PERIOD_BASE: u16 = 510;
/// `SECTOR_BASE + i` expands or collapses `SECTORS[i]`.
pub const SECTOR_BASE: u16 = 560;
/// `SAVE_SECTOR_BASE + i` stores the live weight sum of `SECTORS[i]`.
pub const SAVE_SECTOR_BASE: u16 = 580;
/// `STOCK_BASE + j` toggles stock `j` of the expanded sector.
pub const STOCK_BASE: u16 = 600;
/// `DETAIL_BASE + sel * DETAIL_FIELDS + field` focuses a detail field.
pub const DETAIL_BASE: u16 = 700;
pub const DETAIL_FIELDS: u16 = 5;

pub const MAX_PERIODS: u16 = 40;
pub const MAX_SECTORS: u16 = 20;
pub const MAX_SECTOR_STOCKS: u16 = 30;
pub const MAX_SELECTIONS: u16 = 40;

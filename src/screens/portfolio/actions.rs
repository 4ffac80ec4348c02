//! Semantic action IDs for portfolio setup click targets.

pub const EDIT_BUDGET: u16 = 300;
pub const EDIT_RISK: u16 = 301;
pub const EDIT_CATEGORIES: u16 = 302;
pub const ADD_STOCK: u16 = 303;
pub const PROCEED: u16 = 304;
pub const SAVE: u16 = 305;
pub const CANCEL: u16 = 306;
pub const RISK_DOWN: u16 = 307;
pub const RISK_UP: u16 = 308;

/// `+ index` into the selected categories.
pub const REMOVE_CATEGORY_BASE: u16 = 320;
/// `+ row index` into the stock list.
pub const EDIT_STOCK_BASE: u16 = 350;
pub const DELETE_STOCK_BASE: u16 = 400;
/// `+ StockField index` while a stock is being edited.
pub const FOCUS_FIELD_BASE: u16 = 450;

/// Upper bound for the row-indexed ranges above.
pub const MAX_ROWS: u16 = 30;

//! Action IDs for the auth overlay.

pub const CLOSE: u16 = 900;
pub const TAB_LOGIN: u16 = 901;
pub const TAB_REGISTER: u16 = 902;
pub const SUBMIT: u16 = 903;
/// `FIELD_BASE + i` focuses field `i` of the visible form.
pub const FIELD_BASE: u16 = 910;
pub const MAX_FIELDS: u16 = 20;

//! Bikram Sambat calendar support for the dashboard calendar card and the
//! NEPSE trading-day helpers.
//!
//! Conversion only covers the years in [`BS_YEARS`]; dates outside that
//! range convert to `None`.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "Baisakh", "Jestha", "Ashadh", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

pub const MONTH_NAMES_DEV: [&str; 12] = [
    "बैशाख", "जेठ", "असार", "साउन", "भदौ", "असोज", "कार्तिक", "मंसिर", "पुष", "माघ", "फागुन", "चैत",
];

/// Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

struct BsYear {
    year: i32,
    months: [u8; 12],
}

const BS_YEARS: &[BsYear] = &[
    BsYear {
        year: 2080,
        months: [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    },
    BsYear {
        year: 2081,
        months: [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30],
    },
    BsYear {
        year: 2082,
        months: [31, 32, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30],
    },
];

/// 1 Baisakh 2081.
const REFERENCE_YEAR: i32 = 2081;

fn reference_ad() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 4, 13)
}

fn table_year(year: i32) -> Option<&'static BsYear> {
    BS_YEARS.iter().find(|y| y.year == year)
}

fn year_length(year: &BsYear) -> i64 {
    year.months.iter().map(|&d| d as i64).sum()
}

pub fn days_in_month(year: i32, month: u8) -> Option<u8> {
    table_year(year)?.months.get(month as usize).copied()
}

/// AD date of 1 Baisakh of `year`.
fn year_start(year: i32) -> Option<NaiveDate> {
    table_year(year)?;
    let mut offset = 0i64;
    for y in BS_YEARS {
        if y.year < year && y.year >= REFERENCE_YEAR {
            offset += year_length(y);
        } else if y.year >= year && y.year < REFERENCE_YEAR {
            offset -= year_length(y);
        }
    }
    reference_ad()?.checked_add_signed(Duration::days(offset))
}

/// A Bikram Sambat date. `month` is 0-based, `day` 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BsDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl BsDate {
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        let len = days_in_month(year, month)?;
        (1..=len).contains(&day).then_some(Self { year, month, day })
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }

    pub fn to_ad(&self) -> Option<NaiveDate> {
        let before: i64 = table_year(self.year)?.months[..self.month as usize]
            .iter()
            .map(|&d| d as i64)
            .sum();
        year_start(self.year)?.checked_add_signed(Duration::days(before + self.day as i64 - 1))
    }

    pub fn from_ad(date: NaiveDate) -> Option<Self> {
        for y in BS_YEARS {
            let start = year_start(y.year)?;
            let mut days = (date - start).num_days();
            if days < 0 || days >= year_length(y) {
                continue;
            }
            for (month, &len) in y.months.iter().enumerate() {
                if days < len as i64 {
                    return Some(Self {
                        year: y.year,
                        month: month as u8,
                        day: days as u8 + 1,
                    });
                }
                days -= len as i64;
            }
        }
        None
    }
}

impl std::fmt::Display for BsDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.year, self.month_name(), self.day)
    }
}

pub fn to_nepali_digits(n: impl std::fmt::Display) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0966 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

// ── Month view ─────────────────────────────────────────────────

/// A displayed BS month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u8,
}

impl MonthView {
    pub fn containing(date: BsDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
        }
    }

    /// Previous month, staying put at the start of the table.
    pub fn prev(self) -> Self {
        let candidate = if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        };
        if table_year(candidate.year).is_some() {
            candidate
        } else {
            self
        }
    }

    /// Next month, staying put at the end of the table.
    pub fn next(self) -> Self {
        let candidate = if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        };
        if table_year(candidate.year).is_some() {
            candidate
        } else {
            self
        }
    }

    pub fn first_day(&self) -> Option<BsDate> {
        BsDate::new(self.year, self.month, 1)
    }

    /// Weekday-aligned grid, Sunday first: leading `None`s pad up to the
    /// weekday of the 1st, then day numbers.
    pub fn grid(&self) -> Vec<Option<u8>> {
        let (Some(first), Some(len)) = (
            self.first_day().and_then(|d| d.to_ad()),
            days_in_month(self.year, self.month),
        ) else {
            return Vec::new();
        };
        let pad = first.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![None; pad];
        cells.extend((1..=len).map(Some));
        cells
    }

    /// AD months the view overlaps, e.g. "APR/MAY 2024".
    pub fn ad_span(&self) -> Option<String> {
        let first = self.first_day()?.to_ad()?;
        let last = BsDate::new(self.year, self.month, days_in_month(self.year, self.month)?)?
            .to_ad()?;
        let fmt = |d: NaiveDate| d.format("%b").to_string().to_uppercase();
        Some(if first.year() == last.year() {
            format!("{}/{} {}", fmt(first), fmt(last), first.year())
        } else {
            format!("{} {}/{} {}", fmt(first), first.year(), fmt(last), last.year())
        })
    }
}

// ── NEPSE trading calendar ─────────────────────────────────────

/// NEPSE trades Sunday to Thursday.
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Weekday index of a grid cell (0 = Sunday).
pub fn grid_weekday(index: usize) -> usize {
    index % 7
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketStatus {
    PreOpen,
    Open,
    Closed,
    Weekend,
}

impl MarketStatus {
    /// Pre-open runs 10:00-11:00 and the session 11:00-15:00 local time.
    pub fn at(now: NaiveDateTime) -> Self {
        if !is_trading_day(now.date()) {
            return MarketStatus::Weekend;
        }
        match now.hour() {
            10 => MarketStatus::PreOpen,
            11..=14 => MarketStatus::Open,
            _ => MarketStatus::Closed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketStatus::PreOpen => "PRE-OPEN",
            MarketStatus::Open => "OPEN",
            MarketStatus::Closed => "CLOSED",
            MarketStatus::Weekend => "CLOSED (Weekend)",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, MarketStatus::PreOpen | MarketStatus::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_day() {
        assert_eq!(BsDate::from_ad(ad(2024, 4, 13)), BsDate::new(2081, 0, 1));
        assert_eq!(BsDate::new(2081, 0, 1).unwrap().to_ad(), Some(ad(2024, 4, 13)));
    }

    #[test]
    fn year_boundaries() {
        assert_eq!(BsDate::from_ad(ad(2023, 4, 14)), BsDate::new(2080, 0, 1));
        assert_eq!(BsDate::from_ad(ad(2024, 4, 12)), BsDate::new(2080, 11, 30));
        assert_eq!(BsDate::from_ad(ad(2025, 4, 14)), BsDate::new(2082, 0, 1));
        assert_eq!(BsDate::from_ad(ad(2025, 4, 13)), BsDate::new(2081, 11, 30));
    }

    #[test]
    fn outside_table_is_none() {
        assert_eq!(BsDate::from_ad(ad(2023, 4, 13)), None);
        assert_eq!(BsDate::from_ad(ad(2026, 4, 15)), None);
        assert_eq!(BsDate::from_ad(ad(2026, 4, 14)), BsDate::new(2082, 11, 30));
        assert_eq!(BsDate::new(2079, 0, 1), None);
    }

    #[test]
    fn invalid_days_rejected() {
        assert!(BsDate::new(2081, 8, 29).is_some());
        assert!(BsDate::new(2081, 8, 30).is_none());
        assert!(BsDate::new(2081, 1, 0).is_none());
        assert!(BsDate::new(2081, 12, 1).is_none());
    }

    #[test]
    fn conversion_is_consistent_across_table() {
        let mut day = ad(2023, 4, 14);
        let mut prev: Option<BsDate> = None;
        while let Some(bs) = BsDate::from_ad(day) {
            assert_eq!(bs.to_ad(), Some(day));
            if let Some(p) = prev {
                assert!(bs > p);
            }
            prev = Some(bs);
            day = day.succ_opt().unwrap();
        }
        assert_eq!(prev, BsDate::new(2082, 11, 30));
        assert_eq!(day, ad(2026, 4, 15));
    }

    #[test]
    fn display_and_digits() {
        let d = BsDate::new(2081, 8, 27).unwrap();
        assert_eq!(d.to_string(), "2081 Poush 27");
        assert_eq!(to_nepali_digits(2081), "२०८१");
        assert_eq!(to_nepali_digits("9/10"), "९/१०");
    }

    #[test]
    fn month_navigation_stays_in_table() {
        let first = MonthView { year: 2080, month: 0 };
        assert_eq!(first.prev(), first);
        assert_eq!(MonthView { year: 2081, month: 0 }.prev(), MonthView { year: 2080, month: 11 });
        assert_eq!(MonthView { year: 2081, month: 11 }.next(), MonthView { year: 2082, month: 0 });
        let last = MonthView { year: 2082, month: 11 };
        assert_eq!(last.next(), last);
    }

    #[test]
    fn grid_pads_to_weekday() {
        // 1 Baisakh 2081 = Saturday 13 April 2024.
        let grid = MonthView { year: 2081, month: 0 }.grid();
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 6);
        assert_eq!(grid.len(), 6 + 31);
        assert_eq!(grid.last(), Some(&Some(31)));
        assert_eq!(grid_weekday(6), 6);
    }

    #[test]
    fn ad_span_labels() {
        assert_eq!(
            MonthView { year: 2081, month: 0 }.ad_span().as_deref(),
            Some("APR/MAY 2024")
        );
        // Poush 2081 runs mid-December 2024 to mid-January 2025.
        assert_eq!(
            MonthView { year: 2081, month: 8 }.ad_span().as_deref(),
            Some("DEC 2024/JAN 2025")
        );
    }

    #[test]
    fn trading_days() {
        assert!(is_trading_day(ad(2024, 7, 28))); // Sunday
        assert!(is_trading_day(ad(2024, 7, 25))); // Thursday
        assert!(!is_trading_day(ad(2024, 7, 26))); // Friday
        assert!(!is_trading_day(ad(2024, 7, 27))); // Saturday
    }

    #[test]
    fn market_status_by_hour() {
        let at = |d: u32, h: u32| ad(2024, 7, d).and_hms_opt(h, 30, 0).unwrap();
        assert_eq!(MarketStatus::at(at(28, 9)), MarketStatus::Closed);
        assert_eq!(MarketStatus::at(at(28, 10)), MarketStatus::PreOpen);
        assert_eq!(MarketStatus::at(at(28, 11)), MarketStatus::Open);
        assert_eq!(MarketStatus::at(at(28, 14)), MarketStatus::Open);
        assert_eq!(MarketStatus::at(at(28, 15)), MarketStatus::Closed);
        assert_eq!(MarketStatus::at(at(26, 12)), MarketStatus::Weekend);
        assert!(MarketStatus::PreOpen.is_open());
        assert!(!MarketStatus::Weekend.is_open());
        assert_eq!(MarketStatus::Weekend.label(), "CLOSED (Weekend)");
    }
}

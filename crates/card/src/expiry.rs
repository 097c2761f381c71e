//! Card expiration date (`MM/YY`).

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, Utc};

use crate::{CardError, Result};

/// How far ahead an expiry may lie, in years.
pub const MAX_YEARS_AHEAD: u32 = 20;

/// Month and two-digit year printed on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiry {
    year: u8,
    month: u8,
}

impl Expiry {
    /// Creates an expiry from a month (1-12) and a two-digit year (0-99).
    pub fn new(month: u8, year: u8) -> Result<Self> {
        if !(1..=12).contains(&month) || year > 99 {
            return Err(CardError::InvalidExpiry(format!("{month:02}/{year:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses `MM/YY`.
    ///
    /// Both parts must be exactly two ASCII digits.
    ///
    /// # Example
    /// ```
    /// use datacap_card::Expiry;
    ///
    /// let expiry = Expiry::parse("09/29").unwrap();
    /// assert_eq!(expiry.month(), 9);
    /// assert_eq!(expiry.full_year(), 2029);
    /// assert!(Expiry::parse("9/29").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || CardError::InvalidExpiry(input.to_string());

        let mut parts = input.trim().split('/');
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let month = parse_two_digits(month).ok_or_else(invalid)?;
        let year = parse_two_digits(year).ok_or_else(invalid)?;
        Self::new(month, year).map_err(|_| invalid())
    }

    /// Month, 1-12.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Two-digit year as printed.
    pub fn year(&self) -> u8 {
        self.year
    }

    /// Four-digit year (20YY).
    pub fn full_year(&self) -> i32 {
        2000 + i32::from(self.year)
    }

    /// Month as `MM`.
    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Year as `YY`.
    pub fn year_str(&self) -> String {
        format!("{:02}", self.year)
    }

    /// Last calendar day on which the card is usable.
    pub fn last_day(&self) -> Option<NaiveDate> {
        first_of_month(self.full_year(), u32::from(self.month))?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// Checks the expiry against `today`.
    pub fn check_at(&self, today: NaiveDate) -> Result<()> {
        let last_day = self.last_day().ok_or_else(|| CardError::InvalidExpiry(self.to_string()))?;
        if last_day < today {
            return Err(CardError::Expired);
        }

        let first_day = first_of_month(self.full_year(), u32::from(self.month))
            .ok_or_else(|| CardError::InvalidExpiry(self.to_string()))?;
        let limit = today
            .checked_add_months(Months::new(MAX_YEARS_AHEAD * 12))
            .ok_or(CardError::ExpiryTooFar)?;
        if first_day > limit {
            return Err(CardError::ExpiryTooFar);
        }

        Ok(())
    }

    /// Checks the expiry against the current UTC date.
    pub fn check(&self) -> Result<()> {
        self.check_at(Utc::now().date_naive())
    }
}

impl FromStr for Expiry {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

fn parse_two_digits(part: &str) -> Option<u8> {
    if part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

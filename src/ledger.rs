// Ledger State - income plus three ordered lists of named amounts
//
// "Entry name and amount are VALUES, Entry UUID is IDENTITY"
//
// - Entries are appended, never moved between categories, never removed
// - Amounts are exact decimals, so repeated 0.10s sum to what you expect
// - Income is kept as the raw text the user submitted and re-read on demand

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::amount::{parse_amount, parse_income, saturating_add, saturating_sub};
use crate::error::Result;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Home expenses (rent, utilities, groceries)
    Expenses,

    /// Loan repayments
    Loans,

    /// Credit card payments
    CreditCardPayments,
}

impl Category {
    /// Screen order
    pub const ALL: [Category; 3] = [
        Category::Expenses,
        Category::Loans,
        Category::CreditCardPayments,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Expenses => "Home Expenses",
            Category::Loans => "Loans",
            Category::CreditCardPayments => "Credit Card Payments",
        }
    }

    /// Hint shown in the empty name field
    pub fn name_placeholder(&self) -> &'static str {
        match self {
            Category::Expenses => "Expense Name",
            Category::Loans => "Loan Name",
            Category::CreditCardPayments => "Payment Name",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// ENTRY
// ============================================================================

/// Stable identity of an entry. Random v4, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn generate() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One named monetary line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,

    /// Free-form label, may be empty, not unique
    pub name: String,

    /// Parsed amount; sign and zero are allowed
    pub amount: Decimal,
}

// ============================================================================
// LEDGER STATE
// ============================================================================

/// Aggregate root for one session.
///
/// Owned by whoever drives the screen; there is no global instance, so any
/// number of sessions can live side by side.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    /// Last submitted income text, unparsed
    income: Option<String>,
    expenses: Vec<Entry>,
    loans: Vec<Entry>,
    credit_card_payments: Vec<Entry>,
}

impl LedgerState {
    /// Empty ledger: no income, no entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the income with `raw`. Never fails; the text is interpreted on read.
    pub fn submit_income(&mut self, raw: &str) {
        tracing::debug!(income = raw, "income submitted");
        self.income = Some(raw.to_string());
    }

    /// Raw text of the last income submission
    pub fn income_text(&self) -> Option<&str> {
        self.income.as_deref()
    }

    /// Income as a number; absent or unparseable text reads as zero
    pub fn income(&self) -> Decimal {
        parse_income(self.income_text())
    }

    /// Append a new entry to `category`.
    ///
    /// A `raw_amount` that does not parse leaves every list unchanged and
    /// returns `LedgerError::InvalidAmount`.
    pub fn add_entry(&mut self, category: Category, name: &str, raw_amount: &str) -> Result<EntryId> {
        let amount = match parse_amount(raw_amount) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!(%category, raw_amount, "entry rejected: amount does not parse");
                return Err(err);
            }
        };

        let entry = Entry {
            id: EntryId::generate(),
            name: name.to_string(),
            amount,
        };
        let id = entry.id;

        tracing::debug!(%category, %id, name, %amount, "entry added");
        self.list_mut(category).push(entry);

        Ok(id)
    }

    /// Entries of one category in insertion order
    pub fn entries(&self, category: Category) -> &[Entry] {
        match category {
            Category::Expenses => &self.expenses,
            Category::Loans => &self.loans,
            Category::CreditCardPayments => &self.credit_card_payments,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Expenses => &mut self.expenses,
            Category::Loans => &mut self.loans,
            Category::CreditCardPayments => &mut self.credit_card_payments,
        }
    }

    /// Look up an entry by id across all categories
    pub fn find(&self, id: EntryId) -> Option<(Category, &Entry)> {
        Category::ALL.iter().find_map(|&category| {
            self.entries(category)
                .iter()
                .find(|entry| entry.id == id)
                .map(|entry| (category, entry))
        })
    }

    /// Sum of one category, saturating at the `Decimal` range
    pub fn category_total(&self, category: Category) -> Decimal {
        self.entries(category)
            .iter()
            .fold(Decimal::ZERO, |acc, entry| saturating_add(acc, entry.amount))
    }

    /// Sum over all three categories, saturating at the `Decimal` range
    pub fn total_amount(&self) -> Decimal {
        Category::ALL
            .iter()
            .fold(Decimal::ZERO, |acc, &category| {
                saturating_add(acc, self.category_total(category))
            })
    }

    /// Income minus total; may be negative, saturates instead of overflowing
    pub fn remaining_income(&self) -> Decimal {
        saturating_sub(self.income(), self.total_amount())
    }

    pub fn entry_count(&self) -> usize {
        Category::ALL.iter().map(|&c| self.entries(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_none() && self.entry_count() == 0
    }

    /// All derived figures in one read
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            income: self.income(),
            expenses_total: self.category_total(Category::Expenses),
            loans_total: self.category_total(Category::Loans),
            credit_card_payments_total: self.category_total(Category::CreditCardPayments),
            total_amount: self.total_amount(),
            remaining_income: self.remaining_income(),
        }
    }
}

/// Snapshot of the derived figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub income: Decimal,
    pub expenses_total: Decimal,
    pub loans_total: Decimal,
    pub credit_card_payments_total: Decimal,
    pub total_amount: Decimal,
    pub remaining_income: Decimal,
}

impl LedgerSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining_income.is_sign_negative() && !self.remaining_income.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = LedgerState::new();

        assert!(ledger.is_empty());
        assert_eq!(ledger.income_text(), None);
        for category in Category::ALL {
            assert!(ledger.entries(category).is_empty());
        }
        assert_eq!(ledger.total_amount(), Decimal::ZERO);
        assert_eq!(ledger.remaining_income(), Decimal::ZERO);
    }

    #[test]
    fn test_add_entry_preserves_call_order() {
        let mut ledger = LedgerState::new();

        ledger.add_entry(Category::Loans, "Car", "300").unwrap();
        assert!(ledger.add_entry(Category::Loans, "Bad", "x").is_err());
        ledger.add_entry(Category::Loans, "Student", "120.10").unwrap();
        ledger.add_entry(Category::Loans, "Car", "300").unwrap();

        let names: Vec<&str> = ledger
            .entries(Category::Loans)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Car", "Student", "Car"]);
        assert!(ledger.entries(Category::Expenses).is_empty());
        assert!(ledger.entries(Category::CreditCardPayments).is_empty());
    }

    #[test]
    fn test_invalid_amount_changes_nothing() {
        let mut ledger = LedgerState::new();
        ledger.add_entry(Category::Expenses, "Rent", "100").unwrap();

        let before = ledger.clone();
        let result = ledger.add_entry(Category::Expenses, "Food", "abc");

        assert_eq!(
            result,
            Err(LedgerError::InvalidAmount { raw: "abc".to_string() })
        );
        for category in Category::ALL {
            assert_eq!(ledger.entries(category), before.entries(category));
        }
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut ledger = LedgerState::new();
        let a = ledger.add_entry(Category::Expenses, "Same", "1").unwrap();
        let b = ledger.add_entry(Category::Expenses, "Same", "1").unwrap();
        let c = ledger.add_entry(Category::Loans, "Same", "1").unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(ledger.find(a).map(|(cat, _)| cat), Some(Category::Expenses));
        assert_eq!(ledger.find(c).map(|(cat, _)| cat), Some(Category::Loans));
        assert_eq!(ledger.entries(Category::Expenses)[0].id, a);
    }

    #[test]
    fn test_empty_name_zero_and_negative_accepted() {
        let mut ledger = LedgerState::new();
        ledger.add_entry(Category::Expenses, "", "0").unwrap();
        ledger.add_entry(Category::Expenses, "Refund", "-20").unwrap();

        assert_eq!(ledger.entry_count(), 2);
        assert_eq!(ledger.total_amount(), dec!(-20));
    }

    #[test]
    fn test_single_entry_total() {
        let mut ledger = LedgerState::new();
        ledger.add_entry(Category::CreditCardPayments, "Visa", "25.50").unwrap();

        assert_eq!(ledger.total_amount(), dec!(25.50));
    }

    #[test]
    fn test_full_month_scenario() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("2000");
        ledger.add_entry(Category::Expenses, "Rent", "1200.00").unwrap();
        ledger.add_entry(Category::Loans, "Car", "300.50").unwrap();
        ledger.add_entry(Category::CreditCardPayments, "Visa", "150.25").unwrap();

        assert_eq!(ledger.total_amount(), dec!(1650.75));
        assert_eq!(ledger.remaining_income(), dec!(349.25));
    }

    #[test]
    fn test_unparseable_income_reads_as_zero() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("abc");
        ledger.add_entry(Category::Expenses, "Rent", "100").unwrap();

        assert_eq!(ledger.income_text(), Some("abc"));
        assert_eq!(ledger.remaining_income(), dec!(-100));
        assert!(ledger.summary().is_overspent());
    }

    #[test]
    fn test_income_keeps_last_submission() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("1000");
        ledger.submit_income("2500.50");

        assert_eq!(ledger.income(), dec!(2500.50));
    }

    #[test]
    fn test_no_float_drift() {
        let mut ledger = LedgerState::new();
        for _ in 0..10 {
            ledger.add_entry(Category::Expenses, "Coffee", "0.10").unwrap();
        }

        assert_eq!(ledger.total_amount(), dec!(1.00));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("500");
        ledger.add_entry(Category::Loans, "Car", "120.40").unwrap();

        assert_eq!(ledger.total_amount(), ledger.total_amount());
        assert_eq!(ledger.remaining_income(), ledger.remaining_income());
        assert_eq!(ledger.summary(), ledger.summary());
    }

    #[test]
    fn test_category_totals_add_up() {
        let mut ledger = LedgerState::new();
        ledger.add_entry(Category::Expenses, "Rent", "1200").unwrap();
        ledger.add_entry(Category::Expenses, "Power", "80.20").unwrap();
        ledger.add_entry(Category::Loans, "Car", "300.50").unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.expenses_total, dec!(1280.20));
        assert_eq!(summary.loans_total, dec!(300.50));
        assert_eq!(summary.credit_card_payments_total, Decimal::ZERO);
        assert_eq!(
            summary.total_amount,
            summary.expenses_total + summary.loans_total + summary.credit_card_payments_total
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = LedgerState::new();
        let second = LedgerState::new();
        first.add_entry(Category::Expenses, "Rent", "10").unwrap();

        assert_eq!(first.entry_count(), 1);
        assert_eq!(second.entry_count(), 0);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut ledger = LedgerState::new();
        ledger
            .add_entry(Category::Expenses, "Huge", "79228162514264337593543950335")
            .unwrap();
        ledger.add_entry(Category::Expenses, "One more", "1").unwrap();
        ledger
            .add_entry(Category::Loans, "Huge loan", "79228162514264337593543950335")
            .unwrap();

        assert_eq!(ledger.category_total(Category::Expenses), Decimal::MAX);
        assert_eq!(ledger.total_amount(), Decimal::MAX);
        assert_eq!(ledger.remaining_income(), -Decimal::MAX);
    }

    #[test]
    fn test_remaining_income_saturates_instead_of_overflowing() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("79228162514264337593543950335");
        ledger.add_entry(Category::CreditCardPayments, "Refund", "-1").unwrap();

        assert_eq!(ledger.remaining_income(), Decimal::MAX);
        assert!(!ledger.summary().is_overspent());
    }

    #[test]
    fn test_summary_serializes_amounts_as_strings() {
        let mut ledger = LedgerState::new();
        ledger.submit_income("2000");
        ledger.add_entry(Category::Expenses, "Rent", "1200.00").unwrap();
        ledger.add_entry(Category::Loans, "Car", "300.50").unwrap();
        ledger.add_entry(Category::CreditCardPayments, "Visa", "150.25").unwrap();

        let json = serde_json::to_value(ledger.summary()).unwrap();
        assert_eq!(json["total_amount"], "1650.75");
        assert_eq!(json["remaining_income"], "349.25");
    }
}

// Pending input text for the single-screen form.
//
// Success clears a category's name and amount fields; failure leaves them for
// correction. The income field is never cleared by submission.

use crate::error::Result;
use crate::ledger::{Category, EntryId, LedgerState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub amount: String,
}

impl EntryForm {
    fn clear(&mut self) {
        self.name.clear();
        self.amount.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeForm {
    pub amount: String,
}

/// One text input on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Income,
    Name(Category),
    Amount(Category),
}

impl Field {
    /// Screen order, top to bottom
    pub const ALL: [Field; 7] = [
        Field::Income,
        Field::Name(Category::Expenses),
        Field::Amount(Category::Expenses),
        Field::Name(Category::Loans),
        Field::Amount(Category::Loans),
        Field::Name(Category::CreditCardPayments),
        Field::Amount(Category::CreditCardPayments),
    ];

    fn position(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Field::ALL[(self.position() + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let len = Field::ALL.len();
        Field::ALL[(self.position() + len - 1) % len]
    }

    /// Category this field belongs to, `None` for income
    pub fn category(&self) -> Option<Category> {
        match self {
            Field::Income => None,
            Field::Name(category) | Field::Amount(category) => Some(*category),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Income => "Enter Income",
            Field::Name(category) => category.name_placeholder(),
            Field::Amount(_) => "Amount",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub income: IncomeForm,
    pub expenses: EntryForm,
    pub loans: EntryForm,
    pub credit_card_payments: EntryForm,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_form(&self, category: Category) -> &EntryForm {
        match category {
            Category::Expenses => &self.expenses,
            Category::Loans => &self.loans,
            Category::CreditCardPayments => &self.credit_card_payments,
        }
    }

    fn entry_form_mut(&mut self, category: Category) -> &mut EntryForm {
        match category {
            Category::Expenses => &mut self.expenses,
            Category::Loans => &mut self.loans,
            Category::CreditCardPayments => &mut self.credit_card_payments,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Income => &self.income.amount,
            Field::Name(category) => &self.entry_form(category).name,
            Field::Amount(category) => &self.entry_form(category).amount,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Income => &mut self.income.amount,
            Field::Name(category) => &mut self.entry_form_mut(category).name,
            Field::Amount(category) => &mut self.entry_form_mut(category).amount,
        }
    }

    /// Copy the income field into the ledger
    pub fn submit_income(&self, ledger: &mut LedgerState) {
        ledger.submit_income(&self.income.amount);
    }

    /// Add the pending entry for `category`; clears its fields only on success
    pub fn add_entry(&mut self, ledger: &mut LedgerState, category: Category) -> Result<EntryId> {
        let form = self.entry_form_mut(category);
        let id = ledger.add_entry(category, &form.name, &form.amount)?;
        form.clear();
        Ok(id)
    }

    /// Submit whatever group `field` belongs to
    pub fn submit(&mut self, ledger: &mut LedgerState, field: Field) -> Result<Option<EntryId>> {
        match field.category() {
            None => {
                self.submit_income(ledger);
                Ok(None)
            }
            Some(category) => self.add_entry(ledger, category).map(Some),
        }
    }
}

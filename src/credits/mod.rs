pub mod repo;

pub use repo::{CreditLedger, DebitOutcome, PgCreditLedger};

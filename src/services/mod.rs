pub mod question_bank;
pub mod selector;

pub use question_bank::QuestionBank;
pub use selector::{select, select_with_rng, Quotas, Selection};

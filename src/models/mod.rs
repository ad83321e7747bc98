pub mod exam;
pub mod loaders;
pub mod public;
pub mod question;

pub use exam::{Exam, ExamRequest};
pub use loaders::{load_all_question_files, load_question_file};
pub use public::PublicQuestion;
pub use question::{Difficulty, Distribution, Filter, Origin, Question};

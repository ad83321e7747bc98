pub mod toml_loader;

pub use toml_loader::{load_all_question_files, load_question_file};

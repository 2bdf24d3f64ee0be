// Trivia domain module
// Questions, their categories, and quiz scoping

pub mod category;
pub mod question;
pub mod quiz;

pub use category::Category;
pub use question::{NewQuestion, Question, QuestionView};
pub use quiz::QuizScope;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct Exercise {
    pub id: i64,
    pub course_id: i64,
    pub question: String,
    pub correct_answer: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Exercise {
    /// 判断答案是否正确：忽略首尾空白与大小写
    pub fn is_correct(&self, answer: &str) -> bool {
        normalize_answer(answer) == normalize_answer(&self.correct_answer)
    }

    /// 课程页展示用，只有课程教师能看到正确答案
    pub fn into_view(self, reveal_answer: bool) -> ExerciseView {
        ExerciseView {
            id: self.id,
            question: self.question,
            correct_answer: reveal_answer.then_some(self.correct_answer),
        }
    }
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

// 课程页上的练习题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseView {
    pub id: i64,
    pub question: String,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct Answer {
    pub id: i64,
    pub exercise_id: i64,
    pub student_id: i64,
    pub answer: String,
    pub is_correct: bool,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

// 课程页上的答案（附学生姓名）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct AnswerView {
    pub exercise_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub answer: String,
    pub is_correct: bool,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(correct_answer: &str) -> Exercise {
        Exercise {
            id: 1,
            course_id: 1,
            question: "Mikä on Suomen pääkaupunki?".to_string(),
            correct_answer: correct_answer.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_answer_comparison_ignores_case_and_whitespace() {
        let ex = exercise("Helsinki");
        assert!(ex.is_correct("helsinki"));
        assert!(ex.is_correct("  HELSINKI \n"));
        assert!(!ex.is_correct("Espoo"));
    }

    #[test]
    fn test_view_hides_answer_unless_revealed() {
        assert_eq!(exercise("Helsinki").into_view(false).correct_answer, None);
        assert_eq!(
            exercise("Helsinki").into_view(true).correct_answer.as_deref(),
            Some("Helsinki")
        );
    }
}

use serde::Deserialize;
use ts_rs::TS;

// 新增练习题
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct CreateExerciseRequest {
    pub question: String,
    pub correct_answer: String,
}

// 提交答案
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct AnswerRequest {
    pub answer: String,
}

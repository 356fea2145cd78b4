use super::entities::Answer;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct AnswerResponse {
    pub is_correct: bool,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationError {
    #[error("recommendation.invalid_limit")]
    InvalidLimit,
    #[error("recommendation.generation_failed")]
    GenerationFailed,
    #[error("recommendation.invalid_reply")]
    InvalidReply,
}

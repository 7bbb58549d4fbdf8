/// Intent classification errors. Never fatal; they route to the default handler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("low confidence: {confidence:.2} below threshold {threshold:.2}")]
    LowConfidence { confidence: f64, threshold: f64 },
}

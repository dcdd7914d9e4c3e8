#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    pub text: String,
}

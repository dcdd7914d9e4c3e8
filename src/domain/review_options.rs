pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReviewTask {
    #[default]
    Summarize,
    Detailed,
    SimpleMenu,
    Recommendation,
    /// Free-form instruction supplied by the caller.
    Custom(String),
}

impl ReviewTask {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Summarize => "summarize",
            Self::Detailed => "detailed",
            Self::SimpleMenu => "simple_menu",
            Self::Recommendation => "recommendation",
            Self::Custom(task) => task,
        }
    }
}

impl From<&str> for ReviewTask {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "summarize" | "summary" => Self::Summarize,
            "detailed" => Self::Detailed,
            "simple_menu" => Self::SimpleMenu,
            "recommendation" => Self::Recommendation,
            _ => Self::Custom(raw.to_string()),
        }
    }
}

/// Per-request review parameters, forwarded to the review engine as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOptions {
    pub task: ReviewTask,
    pub language: String,
    pub dietary_restrictions: Option<String>,
    pub allergies: Option<String>,
    pub culture: Option<String>,
}

impl ReviewOptions {
    pub fn for_task(task: ReviewTask) -> Self {
        Self {
            task,
            ..Self::default()
        }
    }
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            task: ReviewTask::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            dietary_restrictions: None,
            allergies: None,
            culture: None,
        }
    }
}

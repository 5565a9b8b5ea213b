use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a task card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    Completed,
    Abandoned,
    InProcess,
    /// No option selected
    #[default]
    Default,
}

impl TaskStatus {
    /// The three selectable options, in display order
    pub const OPTIONS: [TaskStatus; 3] = [
        TaskStatus::Completed,
        TaskStatus::Abandoned,
        TaskStatus::InProcess,
    ];

    /// Parse status from its wire label like "In Process"
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Completed" => Self::Completed,
            "Abandoned" => Self::Abandoned,
            "In Process" => Self::InProcess,
            _ => Self::Default,
        }
    }

    /// Convert status to its wire label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
            Self::InProcess => "In Process",
            Self::Default => "No status",
        }
    }

    /// Next option when cycling: Completed → Abandoned → In Process → none → Completed
    pub fn next(&self) -> Self {
        match self {
            Self::Completed => Self::Abandoned,
            Self::Abandoned => Self::InProcess,
            Self::InProcess => Self::Default,
            Self::Default => Self::Completed,
        }
    }

    /// Position among the selectable options (None for the default)
    pub fn option_index(&self) -> Option<usize> {
        Self::OPTIONS.iter().position(|o| o == self)
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older clients wrote "default" or nothing at all
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Self::from_label(&l)).unwrap_or_default())
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingCard,
    ConfirmClear,
}

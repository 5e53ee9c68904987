//! Widget model: types, instances, the catalog of defaults and the ordered
//! collection placed on the dashboard.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod collection;
pub mod registry;
pub mod view;

pub use collection::WidgetCollection;
pub use registry::{WidgetDescriptor, WidgetRegistry};
pub use view::{WidgetIntent, WidgetView};

// ---------------------------------------------------------------------------
// WidgetType
// ---------------------------------------------------------------------------

/// Kind of widget. Serialized as its kebab-case name.
///
/// Names outside the known set survive a load/save cycle as
/// [`WidgetType::Unknown`] so a newer dashboard file never fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    Music,
    Notes,
    Meditation,
    MeditationTimer,
    Sleep,
    Health,
    Todo,
    Habits,
    Calendar,
    Unknown(String),
}

impl WidgetType {
    /// Every known type, in catalog order.
    pub const KNOWN: [WidgetType; 9] = [
        WidgetType::Music,
        WidgetType::Notes,
        WidgetType::Meditation,
        WidgetType::MeditationTimer,
        WidgetType::Sleep,
        WidgetType::Health,
        WidgetType::Todo,
        WidgetType::Habits,
        WidgetType::Calendar,
    ];

    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::Music => "music",
            WidgetType::Notes => "notes",
            WidgetType::Meditation => "meditation",
            WidgetType::MeditationTimer => "meditation-timer",
            WidgetType::Sleep => "sleep",
            WidgetType::Health => "health",
            WidgetType::Todo => "todo",
            WidgetType::Habits => "habits",
            WidgetType::Calendar => "calendar",
            WidgetType::Unknown(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetType::Unknown(_))
    }

    /// Prefix of the storage key holding this widget's private state, if the
    /// widget keeps any. The full key is `<prefix>-<widget id>`.
    pub fn private_key_prefix(&self) -> Option<&'static str> {
        match self {
            WidgetType::Notes => Some("notes-content"),
            WidgetType::Todo => Some("todo-items"),
            WidgetType::Habits => Some("habits"),
            WidgetType::Calendar => Some("calendar-events"),
            WidgetType::Health => Some("health-data"),
            WidgetType::Sleep => Some("sleep-data"),
            _ => None,
        }
    }
}

impl From<String> for WidgetType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "music" => WidgetType::Music,
            "notes" => WidgetType::Notes,
            "meditation" => WidgetType::Meditation,
            "meditation-timer" => WidgetType::MeditationTimer,
            "sleep" => WidgetType::Sleep,
            "health" => WidgetType::Health,
            "todo" => WidgetType::Todo,
            "habits" => WidgetType::Habits,
            "calendar" => WidgetType::Calendar,
            _ => WidgetType::Unknown(name),
        }
    }
}

impl From<WidgetType> for String {
    fn from(kind: WidgetType) -> Self {
        match kind {
            WidgetType::Unknown(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for WidgetType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WidgetType::from(s.to_string()))
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// One widget instance on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetType,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

impl Widget {
    pub fn new(
        id: impl Into<String>,
        kind: WidgetType,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Storage key of this widget's private state, if it has any.
    pub fn private_key(&self) -> Option<String> {
        self.kind
            .private_key_prefix()
            .map(|prefix| format!("{prefix}-{}", self.id))
    }
}

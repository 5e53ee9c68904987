use thiserror::Error;

/// A rejected intent. The dashboard state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a widget is expanded; collapse it before editing")]
    FocusActive,

    #[error("only available while browsing")]
    NotInBrowse,

    #[error("only available in edit mode")]
    NotInEdit,

    #[error("no widget with id {0:?}")]
    UnknownWidget(String),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MenuError>;

/// Failures surfaced by the menu engine.
///
/// None of these abort the host application: invalid input leaves the
/// engine in a not-indexed state and lookup misses are explicit values
/// callers must check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu items are empty; menu will not be indexed")]
    EmptyTree,

    #[error("menu tree has not been indexed yet")]
    NotIndexed,

    #[error("no menu item with identifier `{0}`")]
    UnknownIdentifier(String),
}

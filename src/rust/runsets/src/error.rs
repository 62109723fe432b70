use thiserror::Error;

/// Errors raised by the checked `try_*` operations on a [`crate::DisjointSet`].
///
/// Each variant is a misuse by the caller, not a runtime condition. The
/// panicking counterparts (`find`, `union`, ...) report the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisjointSetError {
    #[error("key {0} is not registered; call add() before using it")]
    UnregisteredKey(i64),
}

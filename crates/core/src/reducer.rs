//! Reducer trait for pure state transitions.

/// Pure transition semantics: `(state, intent) -> state`.
///
/// - `reduce(&self, intent)` returns the next state as a **new value**.
/// - The receiver is borrowed immutably, so the previous state is never
///   modified; callers compare old and new values to detect changes.
///
/// Reducers must not perform IO or side effects.
pub trait Reducer: Sized {
    type Intent: core::fmt::Debug;

    /// Compute the state that follows `intent`.
    fn reduce(&self, intent: &Self::Intent) -> Self;

    /// Fold a sequence of intents, left to right.
    fn reduce_all<'a, I>(&self, intents: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Intent>,
        Self::Intent: 'a,
        Self: Clone,
    {
        intents
            .into_iter()
            .fold(self.clone(), |state, intent| state.reduce(intent))
    }
}

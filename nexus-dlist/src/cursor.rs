//! Bidirectional traversal.

/// A bidirectional position over a sequence.
///
/// A cursor is either on an element or at the end position. Stepping past
/// either end of the sequence lands on the end position, which absorbs
/// further `move_next`/`move_prev` calls; only `move_first` and `move_last`
/// bring the cursor back onto an element.
pub trait Cursor {
    /// Element type the cursor yields.
    type Item;

    /// Moves to the first element, or to the end if the sequence is empty.
    fn move_first(&mut self);

    /// Moves to the last element, or to the end if the sequence is empty.
    fn move_last(&mut self);

    /// Moves to the successor. No-op at the end position.
    fn move_next(&mut self);

    /// Moves to the predecessor. No-op at the end position.
    fn move_prev(&mut self);

    /// Returns `true` at the end position.
    fn is_end(&self) -> bool;

    /// Returns the element under the cursor.
    fn current(&self) -> Option<&Self::Item>;

    /// Copies the element under the cursor into `out`.
    ///
    /// Returns `false` and leaves `out` untouched at the end position.
    #[inline]
    fn read_current(&self, out: &mut Self::Item) -> bool
    where
        Self::Item: Clone,
    {
        match self.current() {
            Some(value) => {
                out.clone_from(value);
                true
            }
            None => false,
        }
    }
}

//! Line-breaking hints attached to formatted output

use bitflags::bitflags;

bitflags! {
    /// Guidance for the line engine about where a long line may be broken.
    /// Set once when a chunk is written and never changed afterwards.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Hints: u8 {
        /// A break right before this chunk is a good one, taken once the
        /// line runs over the width budget.
        const PREFER_BREAK = 1 << 0;
        /// Never break between this chunk and the one before it.
        const NO_BREAK_BEFORE = 1 << 1;
        /// Never break between this chunk and the one after it.
        const NO_BREAK_AFTER = 1 << 2;
        /// Not counted toward the line's width (comments).
        const ZERO_WIDTH = 1 << 3;
    }
}

/// Layout parameters of the line engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Column beyond which lines get wrapped.
    pub width: usize,
    /// Lines with fewer tokens than this are never wrapped automatically.
    pub min_items: usize,
    /// How many columns a tab counts for.
    pub tab_width: usize,
    /// Spaces added after the tabs of a continuation line.
    pub continuation: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            width: 80,
            min_items: 5,
            tab_width: 8,
            continuation: 4,
        }
    }
}

/// A single assertion-scope guard recognised in a frame signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionMatch {
    /// The `<Word>` of `Per<Word>AssertType`, e.g. `Isolate`.
    pub scope: String,
    /// The category before `_ASSERT`, e.g. `HEAP_ALLOCATION`.
    pub category: String,
    pub allowed: bool,
}

impl AssertionMatch {
    pub fn verb(&self) -> &'static str {
        if self.allowed {
            "Allow"
        } else {
            "Disallow"
        }
    }
}

/// One rendered frame: index, short function name and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub index: usize,
    pub name: String,
    pub location: String,
}

/// Output of the annotator, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotatedLine {
    Frame(FrameLine),
    Assertion(AssertionMatch),
}

/// Rendering knobs. The defaults match the classic `bta` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub index_width: usize,
    pub name_width: usize,
    pub location_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            index_width: 2,
            name_width: 60,
            location_width: 40,
        }
    }
}

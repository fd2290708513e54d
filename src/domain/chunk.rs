/// A bounded slice of extracted text, numbered from 1 in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Single-open accordion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    /// Accordion over `len` items, all closed.
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Currently open item.
    pub fn open(&self) -> Option<usize> {
        self.open
    }

    /// Click item `index`: opens it and closes any other, or closes it if already open.
    ///
    /// Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.open;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open
    }
}

/// Index into a fixed, wrapping sequence (hero slideshow, testimonial slides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cycle {
    len: usize,
    current: usize,
}

impl Cycle {
    /// Cycle over `len` items starting at 0; `len` is clamped to at least 1.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            current: 0,
        }
    }

    /// Current index.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Step forward, wrapping to 0 after the last item.
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    /// Step backward, wrapping to the last item before 0.
    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/faq.rs"]
mod tests;

/// Lightbox navigation over the photo list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lightbox {
    open: bool,
    index: usize,
    count: usize,
}

/// Keys the lightbox reacts to while open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxKey {
    Close,
    Next,
    Prev,
}

impl LightboxKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(LightboxKey::Close),
            "ArrowRight" => Some(LightboxKey::Next),
            "ArrowLeft" => Some(LightboxKey::Prev),
            _ => None,
        }
    }
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Open on `index`. An empty gallery leaves the lightbox closed.
    pub fn open(&mut self, index: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.count = count;
        self.index = index.min(count - 1);
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) -> usize {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.count > 0 {
            self.index = (self.index + self.count - 1) % self.count;
        }
        self.index
    }

    /// Apply a key press. Returns true when the shown photo or visibility
    /// changed.
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        if !self.open {
            return false;
        }
        match key {
            LightboxKey::Close => self.close(),
            LightboxKey::Next => {
                self.next();
            }
            LightboxKey::Prev => {
                self.prev();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut lb = Lightbox::new();
        assert!(lb.open(2, 3));
        assert_eq!(lb.next(), 0);
        assert_eq!(lb.prev(), 2);
        assert_eq!(lb.prev(), 1);
    }

    #[test]
    fn empty_gallery_does_not_open() {
        let mut lb = Lightbox::new();
        assert!(!lb.open(0, 0));
        assert!(!lb.is_open());
    }

    #[test]
    fn keys_only_act_while_open() {
        let mut lb = Lightbox::new();
        assert!(!lb.handle_key(LightboxKey::Next));
        lb.open(0, 2);
        assert!(lb.handle_key(LightboxKey::Next));
        assert_eq!(lb.index(), 1);
        assert!(lb.handle_key(LightboxKey::Close));
        assert!(!lb.is_open());
        assert_eq!(LightboxKey::from_key("Enter"), None);
    }
}

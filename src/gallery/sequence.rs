/// A tile slot in the rendered strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    pub item: T,
    /// false for the copies appended to make the strip loop
    pub canonical: bool,
}

/// Originals followed by one full copy of them, in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSequence<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Clone> LoopSequence<T> {
    pub fn build(items: &[T]) -> Self {
        let originals = items.iter().cloned().map(|item| Slot {
            item,
            canonical: true,
        });
        let copies = items.iter().cloned().map(|item| Slot {
            item,
            canonical: false,
        });
        LoopSequence {
            slots: originals.chain(copies).collect(),
        }
    }
}

impl<T> LoopSequence<T> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    /// Items a counter or search should see: originals only.
    pub fn canonical(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(|slot| slot.canonical)
            .map(|slot| &slot.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryEntry;

    fn entries() -> Vec<GalleryEntry> {
        vec![
            GalleryEntry::new("Zelda Clone", "games/zelda.html"),
            GalleryEntry::new("Tetris", "games/tetris.html"),
            GalleryEntry::new("Puzzle", "games/puzzle.html"),
        ]
    }

    #[test]
    fn doubles_and_mirrors() {
        let entries = entries();
        let sequence = LoopSequence::build(&entries);
        let n = entries.len();
        assert_eq!(sequence.len(), 2 * n);
        for i in 0..n {
            let original = &sequence.slots()[i];
            let copy = &sequence.slots()[i + n];
            assert!(original.canonical);
            assert!(!copy.canonical);
            assert_eq!(original.item.title, copy.item.title);
            assert_eq!(original.item.url, copy.item.url);
        }
    }

    #[test]
    fn canonical_skips_copies() {
        let sequence = LoopSequence::build(&entries());
        let titles: Vec<&str> = sequence.canonical().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Zelda Clone", "Tetris", "Puzzle"]);
    }

    #[test]
    fn empty_stays_empty() {
        let sequence = LoopSequence::<GalleryEntry>::build(&[]);
        assert!(sequence.is_empty());
        assert_eq!(sequence.canonical().count(), 0);
    }
}

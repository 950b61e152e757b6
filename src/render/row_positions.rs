use std::iter::Peekable;

/// Bucket indices to emit as table rows.
///
/// Yields one padding index before the first occupied bucket, every
/// occupied bucket, and one padding index after the last. With
/// `fill_gaps`, any two consecutive occupied buckets more than one index
/// apart get every missing index in between.
pub(crate) struct RowPositions<I: Iterator<Item = i64>> {
    occupied: Peekable<I>,
    fill_gaps: bool,
    previous: Option<i64>,
    finished: bool,
}

impl<I: Iterator<Item = i64>> RowPositions<I> {
    pub(crate) fn new(occupied: I, fill_gaps: bool) -> Self {
        Self {
            occupied: occupied.peekable(),
            fill_gaps,
            previous: None,
            finished: false,
        }
    }
}

impl<I: Iterator<Item = i64>> Iterator for RowPositions<I> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }
        let Some(previous) = self.previous else {
            let first = *self.occupied.peek()?;
            self.previous = Some(first - 1);
            return self.previous;
        };

        let position = match self.occupied.peek().copied() {
            Some(next) if self.fill_gaps && next - previous >= 2 => previous + 1,
            Some(next) => {
                self.occupied.next();
                next
            }
            None => {
                self.finished = true;
                previous + 1
            }
        };
        self.previous = Some(position);
        Some(position)
    }
}

use crate::histogram::Histogram;

/// One cell of a per-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Count(u64),
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackState {
    NotStarted,
    Started,
    Finished,
}

/// Walks one series' column in a clean-style table.
///
/// Placeholders are emitted until the cursor is within 1.5 bucket widths
/// of the series' first bucket and again once it is more than 1.5 widths
/// past the last one; counts (zero included) in between. Positions must be
/// fed in ascending order.
pub(crate) struct SeriesTrack<'a> {
    histogram: Option<&'a Histogram>,
    state: TrackState,
}

impl<'a> SeriesTrack<'a> {
    pub(crate) fn new(histogram: Option<&'a Histogram>) -> Self {
        Self {
            histogram,
            state: TrackState::NotStarted,
        }
    }

    pub(crate) fn cell(&mut self, index: i64) -> Cell {
        let Some(h) = self.histogram else {
            return Cell::Placeholder;
        };
        let (Some(start), Some(finish)) = (h.first_index(), h.last_index()) else {
            return Cell::Placeholder;
        };

        // Indices are whole buckets, so "more than 1.5 widths" is ">= 2".
        if self.state == TrackState::NotStarted && start - index < 2 {
            self.state = TrackState::Started;
        }
        if self.state == TrackState::Started && index - finish >= 2 {
            self.state = TrackState::Finished;
        }

        match self.state {
            TrackState::Started => Cell::Count(h.count_at_index(index)),
            TrackState::NotStarted | TrackState::Finished => Cell::Placeholder,
        }
    }
}

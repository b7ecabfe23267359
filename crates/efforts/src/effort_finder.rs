//! Fastest and slowest segment search over aligned time/distance streams.
//!
//! For a target distance, a segment is a contiguous index range `[i, j]` whose
//! distance span `distance[j] - distance[i]` is at least the target. For every
//! start index the shortest such segment is considered, and the fastest and
//! slowest of those are reported.
//!
//! The sweep keeps a single right pointer that only moves forward, so one
//! target costs O(n). This holds only while `distance` is non-decreasing;
//! callers validate that through [`crate::streams::ActivityStreams`].

/// Durations and start positions of the fastest and slowest segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentExtremes {
    /// Elapsed time of the fastest segment, in the unit of the time stream.
    pub min_duration: f64,
    /// Elapsed time of the slowest segment.
    pub max_duration: f64,
    /// Distance stream value at the fastest segment's start index.
    pub best_start_distance: f64,
    /// Distance stream value at the slowest segment's start index.
    pub worst_start_distance: f64,
}

/// Counters collected during one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// How many times the right pointer moved forward.
    pub pointer_advances: usize,
    /// Number of start indices that closed a valid segment.
    pub valid_windows: usize,
}

/// Find the fastest and slowest segments covering at least `target`.
///
/// Returns `None` when no segment reaches the target.
pub fn find_segment_extremes(
    time: &[f64],
    distance: &[f64],
    target: f64,
) -> Option<SegmentExtremes> {
    sweep_with_stats(time, distance, target).0
}

/// Same as [`find_segment_extremes`], also reporting sweep counters.
pub fn sweep_with_stats(
    time: &[f64],
    distance: &[f64],
    target: f64,
) -> (Option<SegmentExtremes>, SweepStats) {
    // Unaligned input is cut to the common prefix
    let n = time.len().min(distance.len());

    let mut stats = SweepStats::default();
    let mut min_duration = f64::INFINITY;
    let mut max_duration = f64::NEG_INFINITY;
    let mut fastest_start: Option<usize> = None;
    let mut slowest_start: Option<usize> = None;

    let mut j = 0;
    for i in 0..n {
        while j < n && distance[j] - distance[i] < target {
            j += 1;
            stats.pointer_advances += 1;
        }

        // Once j runs off the end no later start can close a window either.
        if j == n {
            break;
        }

        stats.valid_windows += 1;
        let elapsed = time[j] - time[i];
        if elapsed < min_duration {
            min_duration = elapsed;
            fastest_start = Some(i);
        }
        if elapsed > max_duration {
            max_duration = elapsed;
            slowest_start = Some(i);
        }
    }

    let extremes = match (fastest_start, slowest_start) {
        (Some(best), Some(worst)) => Some(SegmentExtremes {
            min_duration,
            max_duration,
            best_start_distance: distance[best],
            worst_start_distance: distance[worst],
        }),
        _ => None,
    };

    (extremes, stats)
}

/// Whether the overall distance span of the stream covers `target`.
pub fn is_reachable(distance: &[f64], target: f64) -> bool {
    match (distance.first(), distance.last()) {
        (Some(first), Some(last)) => last - first >= target,
        _ => false,
    }
}

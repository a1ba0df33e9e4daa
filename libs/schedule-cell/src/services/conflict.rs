use chrono::NaiveTime;

/// An existing booking's time slot, as loaded from the store.
#[derive(Debug, Clone, Copy)]
pub struct BookedSlot {
    pub id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Half-open interval overlap test against one existing slot `[s, e)`.
///
/// The proposed interval `[start, end)` collides when its start falls
/// inside the slot, its end falls inside the slot, or it contains the
/// slot outright. Intervals that merely touch (one ends exactly where the
/// other begins) do not conflict.
pub fn slots_overlap(s: NaiveTime, e: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    (s <= start && start < e) || (s < end && end <= e) || (start <= s && e <= end)
}

/// Returns true when the proposed `[start, end)` overlaps any existing
/// slot, skipping `exclude_id` so a reschedule never conflicts with
/// itself. Callers guarantee `start < end`; nothing is re-validated here.
pub fn has_conflict(
    existing: &[BookedSlot],
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<i64>,
) -> bool {
    existing
        .iter()
        .filter(|slot| Some(slot.id) != exclude_id)
        .any(|slot| slots_overlap(slot.start_time, slot.end_time, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(id: i64, sh: u32, sm: u32, eh: u32, em: u32) -> BookedSlot {
        BookedSlot {
            id,
            start_time: t(sh, sm),
            end_time: t(eh, em),
        }
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let existing = [slot(1, 9, 0, 10, 0)];
        assert!(!has_conflict(&existing, t(10, 0), t(11, 0), None));
        assert!(!has_conflict(&existing, t(8, 0), t(9, 0), None));
    }

    #[test]
    fn start_inside_existing_conflicts() {
        let existing = [slot(1, 9, 0, 10, 0)];
        assert!(has_conflict(&existing, t(9, 30), t(11, 0), None));
    }

    #[test]
    fn end_inside_existing_conflicts() {
        let existing = [slot(1, 9, 0, 10, 0)];
        assert!(has_conflict(&existing, t(8, 0), t(9, 30), None));
    }

    #[test]
    fn proposed_contains_existing_conflicts() {
        let existing = [slot(1, 9, 0, 12, 0)];
        assert!(has_conflict(&existing, t(10, 0), t(11, 0), None));

        let narrow = [slot(2, 10, 0, 11, 0)];
        assert!(has_conflict(&narrow, t(9, 0), t(12, 0), None));
    }

    #[test]
    fn identical_intervals_conflict() {
        let existing = [slot(1, 9, 0, 10, 0)];
        assert!(has_conflict(&existing, t(9, 0), t(10, 0), None));
    }

    #[test]
    fn excluding_self_allows_reschedule_in_place() {
        let existing = [slot(42, 9, 0, 10, 0)];
        assert!(!has_conflict(&existing, t(9, 0), t(10, 0), Some(42)));
        // Other bookings still count.
        let two = [slot(42, 9, 0, 10, 0), slot(7, 9, 30, 10, 30)];
        assert!(has_conflict(&two, t(9, 0), t(10, 0), Some(42)));
    }

    #[test]
    fn empty_day_never_conflicts() {
        assert!(!has_conflict(&[], t(0, 0), t(23, 59), None));
    }

    #[test]
    fn three_clause_form_matches_standard_overlap_test() {
        // Exhaustive sweep over quarter-hour grids: the evaluated form must
        // agree with `start < e && s < end` everywhere.
        let grid: Vec<NaiveTime> = (0..=16).map(|q| t(8 + q / 4, (q % 4) * 15)).collect();

        for &s in &grid {
            for &e in &grid {
                if s >= e {
                    continue;
                }
                for &start in &grid {
                    for &end in &grid {
                        if start >= end {
                            continue;
                        }
                        let expected = start < e && s < end;
                        assert_eq!(
                            slots_overlap(s, e, start, end),
                            expected,
                            "disagreement for existing [{}, {}) vs proposed [{}, {})",
                            s, e, start, end
                        );
                    }
                }
            }
        }
    }
}

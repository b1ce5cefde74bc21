use chrono::NaiveDate;

use crate::vocab::types::StreakState;

/// Daily check-in transition. Pure in `(prior, today)`.
///
/// - already checked in today: unchanged
/// - last practice was yesterday: count + 1
/// - anything else, including no prior state: count restarts at 1
pub fn check_in(prior: Option<StreakState>, today: NaiveDate) -> StreakState {
    match prior {
        Some(state) if state.last_practiced_date == today => state,
        Some(state) if state.last_practiced_date.succ_opt() == Some(today) => StreakState {
            streak_count: state.streak_count.saturating_add(1),
            last_practiced_date: today,
        },
        _ => StreakState {
            streak_count: 1,
            last_practiced_date: today,
        },
    }
}

pub fn display_label(count: u32) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{count} days")
    }
}

//! French month and weekday names used in the report.

pub const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "fevrier",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "aout",
    "septembre",
    "octobre",
    "novembre",
    "decembre",
];

/// Indexed by ISO weekday, Monday = 0.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Panics when `month` is outside 1..=12.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        other => panic!("month {other} outside 1..=12"),
    }
}

/// Panics when `weekday` is outside 0..=6.
pub fn weekday_name(weekday: u32) -> &'static str {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .copied()
        .unwrap_or_else(|| panic!("weekday {weekday} outside 0..=6"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_calendar_order() {
        assert_eq!(month_name(1), "janvier");
        assert_eq!(month_name(3), "mars");
        assert_eq!(month_name(12), "decembre");
        assert_eq!(weekday_name(0), "lundi");
        assert_eq!(weekday_name(6), "dimanche");
    }

    #[test]
    #[should_panic(expected = "month 13 outside 1..=12")]
    fn month_out_of_range_panics() {
        month_name(13);
    }

    #[test]
    #[should_panic(expected = "month 0 outside 1..=12")]
    fn month_zero_panics() {
        month_name(0);
    }

    #[test]
    #[should_panic(expected = "weekday 7 outside 0..=6")]
    fn weekday_out_of_range_panics() {
        weekday_name(7);
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use portal_sync::domain::services::eligibility_filter::{EligibilityFilter, YearInference};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter() -> EligibilityFilter {
        EligibilityFilter::with_default_inference(date(2026, 1, 21))
    }

    #[test]
    fn test_ongoing_marker_wins_over_everything() {
        let filter = filter();
        for text in ["상시채용 (오늘)", "채용시 마감 ~ 12/01", "Rolling, closes today"] {
            assert!(filter.is_eligible(text), "{text}");
        }
    }

    #[test]
    fn test_unparseable_text_is_eligible() {
        let filter = filter();
        for text in ["", "마감일 미정", "~ 곧 마감", "~ 13/45", "~ 02/30", "D-7"] {
            assert!(filter.is_eligible(text), "{text}");
        }
    }

    /// 推断规则的月份边界
    #[test]
    fn test_rollover_boundary() {
        let filter = filter();
        assert_eq!(filter.parse_range_deadline("~ 05/31"), Some(date(2026, 5, 31)));
        assert_eq!(filter.parse_range_deadline("~ 06/01"), Some(date(2025, 6, 1)));
        assert!(filter.is_eligible("~ 05/31(일)"));
        assert!(!filter.is_eligible("~ 06/01(일)"));
    }

    #[test]
    fn test_custom_inference() {
        let filter = EligibilityFilter::new(
            date(2026, 7, 1),
            YearInference {
                base_year: 2026,
                rollover_month: 1,
            },
        );

        assert_eq!(filter.parse_range_deadline("~ 07/01"), Some(date(2026, 7, 1)));
        assert!(filter.is_eligible("~ 07/01"));
        assert!(!filter.is_eligible("~ 06/30"));
    }

    #[test]
    fn test_evaluation_is_case_insensitive() {
        let filter = filter();
        assert!(filter.is_eligible("ONGOING"));
        assert!(!filter.is_eligible("Closes TOMORROW"));
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let filter = filter();
        let inputs = ["~ 01/21", "~ 01/20", "오늘마감", "상시채용", "~ 02/29"];
        let first: Vec<bool> = inputs.iter().map(|t| filter.is_eligible(t)).collect();
        let second: Vec<bool> = inputs.iter().map(|t| filter.is_eligible(t)).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![true, false, false, true, true]);
    }
}

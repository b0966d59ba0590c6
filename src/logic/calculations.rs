use crate::models::{DerivedSchedule, Hemisphere, PlantProfile, SprayType, UserPreferences};
use chrono::{Datelike, NaiveDate};

/// Months between mirrored seasons.
pub const SOUTHERN_OFFSET: u32 = 6;

/// Shift a 1-based month into the given hemisphere, wrapping past December.
pub fn adjust_month(month: u32, hemisphere: Hemisphere) -> u32 {
    match hemisphere {
        Hemisphere::Northern => month,
        Hemisphere::Southern => (month + SOUTHERN_OFFSET - 1) % 12 + 1,
    }
}

/// Adjust every month, keeping the input order.
pub fn adjust_months(months: &[u32], hemisphere: Hemisphere) -> Vec<u32> {
    months
        .iter()
        .map(|&m| adjust_month(m, hemisphere))
        .collect()
}

pub fn select_products(profile: &PlantProfile, spray_type: SprayType) -> Vec<String> {
    profile.spray_products.for_type(spray_type).to_vec()
}

/// First day of the earliest listed month at or after `today`'s month, this
/// year; otherwise the first day of the earliest month next year.
///
/// Always anchored to day 1, so an active month yields a date earlier than
/// `today` when called mid-month.
pub fn next_occurrence(months: &[u32], today: NaiveDate) -> Option<NaiveDate> {
    let mut sorted: Vec<u32> = months
        .iter()
        .copied()
        .filter(|m| (1..=12).contains(m))
        .collect();
    sorted.sort_unstable();

    let current_month = today.month();
    if let Some(&month) = sorted.iter().find(|&&m| m >= current_month) {
        return NaiveDate::from_ymd_opt(today.year(), month, 1);
    }

    let first = *sorted.first()?;
    NaiveDate::from_ymd_opt(today.year() + 1, first, 1)
}

pub fn compute_schedule(
    profile: &PlantProfile,
    hemisphere: Hemisphere,
    organic_preference: bool,
    today: NaiveDate,
) -> DerivedSchedule {
    let pruning_months = adjust_months(&profile.pruning_months, hemisphere);
    let spray_months = adjust_months(&profile.spray_months, hemisphere);
    let spray_type = SprayType::from_preference(organic_preference);

    DerivedSchedule {
        next_pruning: next_occurrence(&pruning_months, today),
        next_spray: next_occurrence(&spray_months, today),
        pruning_months,
        spray_months,
        spray_products: select_products(profile, spray_type),
        spray_type,
        care_notes: profile.care_notes.clone(),
    }
}

pub fn schedule_for(
    profile: &PlantProfile,
    prefs: &UserPreferences,
    today: NaiveDate,
) -> DerivedSchedule {
    compute_schedule(profile, prefs.hemisphere, prefs.organic_preference, today)
}

/// Whole days from `now` until midnight of `date`, truncated toward zero.
pub fn days_until(date: NaiveDate, now: chrono::NaiveDateTime) -> i64 {
    (date.and_time(chrono::NaiveTime::MIN) - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::PlantCatalog;
    use crate::models::PlantKind;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn southern_shift_wraps_months() {
        assert_eq!(adjust_month(1, Hemisphere::Southern), 7);
        assert_eq!(adjust_month(6, Hemisphere::Southern), 12);
        assert_eq!(adjust_month(7, Hemisphere::Southern), 1);
        assert_eq!(adjust_month(12, Hemisphere::Southern), 6);
        assert_eq!(adjust_month(12, Hemisphere::Northern), 12);
    }

    #[test]
    fn adjustment_is_a_bijection() {
        for hemisphere in [Hemisphere::Northern, Hemisphere::Southern] {
            let mut seen: Vec<u32> = (1..=12).map(|m| adjust_month(m, hemisphere)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (1..=12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn adjust_months_keeps_order() {
        assert_eq!(
            adjust_months(&[6, 7, 8], Hemisphere::Southern),
            vec![12, 1, 2]
        );
    }

    #[test]
    fn next_occurrence_this_year() {
        assert_eq!(
            next_occurrence(&[3, 4, 5, 9], date(2024, 6, 10)),
            Some(date(2024, 9, 1))
        );
    }

    #[test]
    fn next_occurrence_wraps_to_next_year() {
        assert_eq!(
            next_occurrence(&[3, 4, 5], date(2024, 10, 2)),
            Some(date(2025, 3, 1))
        );
    }

    #[test]
    fn next_occurrence_current_month_anchors_to_day_one() {
        let today = date(2024, 4, 20);
        let next = next_occurrence(&[3, 4, 5], today).unwrap();
        assert_eq!(next, date(2024, 4, 1));
        assert!(next < today);
    }

    #[test]
    fn next_occurrence_empty_is_none() {
        assert_eq!(next_occurrence(&[], date(2024, 1, 1)), None);
    }

    #[test]
    fn cherry_southern_hemisphere() {
        let catalog = PlantCatalog::builtin().unwrap();
        let cherry = catalog.get(PlantKind::Cherry).unwrap();
        let schedule = compute_schedule(cherry, Hemisphere::Southern, true, date(2024, 3, 1));
        assert_eq!(schedule.pruning_months, vec![12, 1, 2]);
        assert_eq!(schedule.next_pruning, Some(date(2024, 12, 1)));
        assert_eq!(schedule.spray_months, vec![9, 10, 11]);
        assert_eq!(schedule.next_spray, Some(date(2024, 9, 1)));
    }

    #[test]
    fn apple_conventional_products() {
        let catalog = PlantCatalog::builtin().unwrap();
        let apple = catalog.get(PlantKind::Apple).unwrap();
        let schedule = compute_schedule(apple, Hemisphere::Northern, false, date(2024, 3, 1));
        assert_eq!(
            schedule.spray_products,
            vec!["Captan", "Imidacloprid", "Malathion", "Fungicide spray"]
        );
        assert_eq!(schedule.spray_type, SprayType::Conventional);
    }

    #[test]
    fn apple_organic_products() {
        let catalog = PlantCatalog::builtin().unwrap();
        let apple = catalog.get(PlantKind::Apple).unwrap();
        let schedule = compute_schedule(apple, Hemisphere::Northern, true, date(2024, 3, 1));
        assert_eq!(schedule.spray_products[0], "Neem oil");
        assert_eq!(schedule.care_notes, apple.care_notes);
    }

    #[test]
    fn schedule_is_deterministic() {
        let catalog = PlantCatalog::builtin().unwrap();
        let prefs = UserPreferences::new(Hemisphere::Southern, false);
        for profile in catalog.iter() {
            let today = date(2025, 7, 19);
            assert_eq!(
                schedule_for(profile, &prefs, today),
                schedule_for(profile, &prefs, today)
            );
        }
    }

    #[test]
    fn days_until_truncates_partial_days() {
        let now = date(2024, 3, 1).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(days_until(date(2024, 3, 16), now), 14);
        assert_eq!(days_until(date(2024, 3, 1), now), 0);
        assert_eq!(days_until(date(2024, 2, 1), now), -29);
    }

    proptest! {
        #[test]
        fn adjusted_months_stay_in_range(month in 1u32..=12) {
            for hemisphere in [Hemisphere::Northern, Hemisphere::Southern] {
                let adjusted = adjust_month(month, hemisphere);
                prop_assert!((1..=12).contains(&adjusted));
            }
            prop_assert_eq!(
                adjust_month(adjust_month(month, Hemisphere::Southern), Hemisphere::Southern),
                month
            );
        }

        #[test]
        fn next_occurrence_lands_on_listed_month(
            months in proptest::collection::vec(1u32..=12, 0..6),
            year in 2000i32..2100,
            ordinal in 1u32..=365,
        ) {
            let today = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            match next_occurrence(&months, today) {
                Some(next) => {
                    prop_assert!(months.contains(&next.month()));
                    prop_assert_eq!(next.day(), 1);
                    prop_assert!(next.year() == today.year() || next.year() == today.year() + 1);
                }
                None => prop_assert!(months.is_empty()),
            }
        }
    }
}

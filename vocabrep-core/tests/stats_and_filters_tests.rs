use chrono::{Duration, NaiveDate, TimeZone, Utc};
use vocabrep_core::{
    calculate_streak, calculate_user_statistics, cards_due_for_review, create_new_card,
    filter_by_scope, filter_by_status, filter_by_text, group_cards_by_category, Card, CardScope,
    CardStatus, CoreError, DailyRecord, FixedClock, ScopeFilter, StreakSummary, UserStatistics,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

fn card(word: &str, scope: CardScope) -> Card {
    let clock = FixedClock::at_date(days_ago(30));
    let mut c = create_new_card(word, format!("{word}-tr"), scope, &clock);
    c.next_review_date = today() + Duration::days(3);
    c
}

fn with_history(mut c: Card, reps: u32, correct: u32, incorrect: u32) -> Card {
    c.repetitions = reps;
    c.correct_count = correct;
    c.incorrect_count = incorrect;
    c.total_reviews = correct + incorrect;
    c
}

fn animals() -> CardScope {
    CardScope::category("c-animals", "Animals")
}

fn food() -> CardScope {
    CardScope::category("c-food", "Food")
}

#[test]
fn due_set_is_by_calendar_day() {
    let mut yesterday = card("dog", CardScope::Custom);
    yesterday.next_review_date = days_ago(1);
    let mut on_today = card("cat", CardScope::Custom);
    on_today.next_review_date = today();
    let mut tomorrow = card("cow", CardScope::Custom);
    tomorrow.next_review_date = today() + Duration::days(1);

    let v = vec![tomorrow, on_today, yesterday];
    let due = cards_due_for_review(&v, today(), None);
    let words: Vec<&str> = due.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, ["dog", "cat"]);
}

#[test]
fn due_set_ignores_time_of_day() {
    let mut c = card("owl", CardScope::Custom);
    c.next_review_date = today();
    // Late evening and just after midnight resolve to the same day.
    let late = Utc.with_ymd_and_hms(2025, 6, 15, 23, 59, 59).unwrap();
    let early = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 1).unwrap();
    for now in [late, early] {
        assert_eq!(cards_due_for_review(&[c.clone()], now.date_naive(), None).len(), 1);
    }
    let eve = Utc.with_ymd_and_hms(2025, 6, 14, 23, 59, 59).unwrap();
    assert!(cards_due_for_review(&[c], eve.date_naive(), None).is_empty());
}

#[test]
fn overdue_cards_stay_due() {
    let mut c = card("ancient", CardScope::Custom);
    c.next_review_date = days_ago(400);
    assert_eq!(cards_due_for_review(&[c], today(), None).len(), 1);
}

#[test]
fn limit_keeps_most_overdue() {
    let mut cards = Vec::new();
    for (i, word) in ["a", "b", "c", "d"].iter().enumerate() {
        let mut c = card(word, CardScope::Custom);
        c.next_review_date = days_ago(i as i64);
        cards.push(c);
    }
    let due = cards_due_for_review(&cards, today(), Some(2));
    let words: Vec<&str> = due.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, ["d", "c"]);

    assert_eq!(cards_due_for_review(&cards, today(), Some(10)).len(), 4);
    assert!(cards_due_for_review(&[], today(), Some(3)).is_empty());
}

#[test]
fn filters_scope_status_and_text() {
    let v = vec![
        with_history(card("Hund", animals()), 0, 0, 0),
        with_history(card("Brot", food()), 2, 2, 0),
        with_history(card("hallo", CardScope::Custom), 6, 6, 1),
    ];

    assert_eq!(filter_by_scope(&v, &ScopeFilter::All).len(), 3);
    assert_eq!(filter_by_scope(&v, &ScopeFilter::Custom)[0].word, "hallo");
    assert_eq!(filter_by_scope(&v, &ScopeFilter::AnyCategory).len(), 2);
    assert_eq!(
        filter_by_scope(&v, &ScopeFilter::Category("c-food".into()))[0].word,
        "Brot"
    );

    assert_eq!(filter_by_status(&v, CardStatus::New)[0].word, "Hund");
    assert_eq!(filter_by_status(&v, CardStatus::Learning)[0].word, "Brot");
    assert_eq!(filter_by_status(&v, CardStatus::Mastered)[0].word, "hallo");

    assert_eq!(filter_by_text(&v, "hund").len(), 1);
    assert_eq!(filter_by_text(&v, "TR").len(), 3);
    assert_eq!(filter_by_text(&v, "  ").len(), 3);
}

#[test]
fn user_statistics_counts_by_status() {
    let mut due = with_history(card("uno", CardScope::Custom), 1, 1, 0);
    due.next_review_date = today();
    let v = vec![
        due,
        with_history(card("dos", CardScope::Custom), 0, 0, 2),
        with_history(card("tres", animals()), 4, 5, 1),
        with_history(card("cuatro", animals()), 5, 7, 0),
    ];
    let s = calculate_user_statistics(&v, today()).unwrap();
    assert_eq!(s.total, 4);
    assert_eq!(s.new_cards, 1);
    assert_eq!(s.learning_cards, 2);
    assert_eq!(s.mastered_cards, 1);
    assert_eq!(s.due_today, 1);
    // 13 correct of 16 reviews = 81.25%
    assert_eq!(s.overall_accuracy, 81);
}

#[test]
fn accuracy_is_zero_without_reviews() {
    let v = vec![card("a", CardScope::Custom), card("b", animals())];
    let s = calculate_user_statistics(&v, today()).unwrap();
    assert_eq!(s.overall_accuracy, 0);

    let empty = calculate_user_statistics(&[], today()).unwrap();
    assert_eq!(empty, UserStatistics::default());
    assert!(group_cards_by_category(&[]).unwrap().is_empty());
}

#[test]
fn malformed_card_fails_aggregation() {
    let mut bad = card("broken", animals());
    bad.total_reviews = 3;
    let v = vec![card("fine", animals()), bad];
    assert!(matches!(
        calculate_user_statistics(&v, today()),
        Err(CoreError::MalformedCard(_))
    ));
    assert!(matches!(
        group_cards_by_category(&v),
        Err(CoreError::MalformedCard(_))
    ));
}

#[test]
fn groups_by_category_and_skips_custom() {
    let v = vec![
        with_history(card("cat", animals()), 0, 0, 1),
        with_history(card("dog", animals()), 3, 3, 0),
        with_history(card("bread", food()), 1, 1, 1),
        with_history(card("mine", CardScope::Custom), 9, 9, 0),
    ];
    let groups = group_cards_by_category(&v).unwrap();
    assert_eq!(groups.len(), 2);

    let a = &groups[0];
    assert_eq!(a.category_id, "c-animals");
    assert_eq!(a.category_name, "Animals");
    assert_eq!(a.total_words, 2);
    assert_eq!(a.learned_words, 1);
    assert_eq!(a.accuracy, 75);

    let f = &groups[1];
    assert_eq!(f.category_id, "c-food");
    assert_eq!(f.learned_words, 1);
    assert_eq!(f.accuracy, 50);
}

#[test]
fn streak_counts_back_from_today() {
    let records = [
        DailyRecord::new(today(), 1),
        DailyRecord::new(days_ago(1), 1),
        DailyRecord::new(days_ago(2), 1),
        DailyRecord::new(days_ago(3), 0),
    ];
    let s = calculate_streak(&records, today());
    assert_eq!(s.current_streak, 3);
    assert_eq!(s.longest_streak, 3);
}

#[test]
fn no_review_today_means_no_current_streak() {
    let records = [
        DailyRecord::new(days_ago(1), 4),
        DailyRecord::new(days_ago(2), 2),
    ];
    let s = calculate_streak(&records, today());
    assert_eq!(s.current_streak, 0);
    assert_eq!(s.longest_streak, 2);

    let zero_today = [DailyRecord::new(today(), 0), DailyRecord::new(days_ago(1), 3)];
    assert_eq!(calculate_streak(&zero_today, today()).current_streak, 0);
}

#[test]
fn longest_streak_spans_gaps_and_zero_days() {
    let records = [
        DailyRecord::new(today(), 1),
        // gap at days_ago(1)
        DailyRecord::new(days_ago(2), 1),
        DailyRecord::new(days_ago(3), 1),
        DailyRecord::new(days_ago(4), 1),
        DailyRecord::new(days_ago(5), 0),
        DailyRecord::new(days_ago(6), 2),
        DailyRecord::new(days_ago(7), 2),
    ];
    let s = calculate_streak(&records, today());
    assert_eq!(
        s,
        StreakSummary {
            current_streak: 1,
            longest_streak: 3,
        }
    );
}

#[test]
fn streak_is_order_independent_and_merges_duplicates() {
    let records = [
        DailyRecord::new(days_ago(1), 1),
        DailyRecord::new(today(), 0),
        DailyRecord::new(today(), 2),
        DailyRecord::new(days_ago(2), 1),
    ];
    let s = calculate_streak(&records, today());
    assert_eq!(s.current_streak, 3);
    assert_eq!(s.longest_streak, 3);

    assert_eq!(calculate_streak(&[], today()), StreakSummary::default());
}

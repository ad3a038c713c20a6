//! End-to-end crontab tests
//!
//! Drives the full pipeline the way an embedding program would: a cache
//! of expressions, actions registered against them, and a stream of
//! timestamps fed through `match_run`.

use cronmatch::{parse_timestamp, CronError, CronExpr, ExprCache, FieldMatcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_action(count: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
    let handle = Arc::clone(count);
    move || {
        handle.fetch_add(1, Ordering::SeqCst);
    }
}

// ─── Crontab driver scenario ─────────────────────────────────────

#[test]
fn test_crontab_drives_actions_over_a_timestamp_stream() {
    let timestamps = [
        "2020/08/01 12:01:00",
        "2020/08/02 12:01:00",
        "2020/08/03 12:01:09",
        "2020/08/04 11:01:03",
        "2020/08/05 11:01:00",
        "2020/08/23 13:01:01",
        "2020/08/23 13:11:00",
        "2020/08/23 23:02:07",
        "2020/08/23 12:58:00",
        "2020/09/01 11:01:20",
    ];

    let mut cache = ExprCache::new();

    let job1_runs = Arc::new(AtomicUsize::new(0));
    let job2_runs = Arc::new(AtomicUsize::new(0));
    let job3_runs = Arc::new(AtomicUsize::new(0));

    cache
        .lookup("1 11-12 */2 * *")
        .unwrap()
        .add_action(counting_action(&job1_runs))
        .add_action(counting_action(&job2_runs));
    cache
        .lookup("*/2 * * * *")
        .unwrap()
        .add_action(counting_action(&job3_runs));

    let mut first_matches = 0;
    let mut second_matches = 0;
    for text in timestamps {
        let at = parse_timestamp(text).unwrap();
        if cache.lookup("1 11-12 */2 * *").unwrap().match_run(at).unwrap() {
            first_matches += 1;
        }
        if cache.lookup("*/2 * * * *").unwrap().match_run(at).unwrap() {
            second_matches += 1;
        }
    }

    // Minute 1, hour 11-12, odd day of month: Aug 1 12:01, Aug 3 12:01,
    // Aug 5 11:01, Sep 1 11:01.
    assert_eq!(first_matches, 4);
    assert_eq!(job1_runs.load(Ordering::SeqCst), 4);
    assert_eq!(job2_runs.load(Ordering::SeqCst), 4);

    // Even minutes: 23:02 and 12:58.
    assert_eq!(second_matches, 2);
    assert_eq!(job3_runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_cache_returns_one_instance_per_normalized_text() {
    let mut cache = ExprCache::new();
    let runs = Arc::new(AtomicUsize::new(0));

    cache
        .lookup("1  11-12   */2 * *")
        .unwrap()
        .add_action(counting_action(&runs));

    // A differently spaced spelling reaches the same expression and its
    // registered action.
    let at = parse_timestamp("2020-08-01 11:01:00").unwrap();
    assert!(cache.lookup("1 11-12 */2 * *").unwrap().match_run(at).unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

// ─── Parse-time failures ─────────────────────────────────────────

#[test]
fn test_parse_errors_surface_at_the_boundary() {
    assert!(matches!(
        CronExpr::parse("60 * * * *").unwrap_err(),
        CronError::OutOfBounds { field: "minutes", min: 0, max: 59 }
    ));
    assert!(matches!(
        CronExpr::parse("* * 32 * *").unwrap_err(),
        CronError::OutOfBounds { field: "day of month", .. }
    ));
    assert!(matches!(
        CronExpr::parse("* * * * monday").unwrap_err(),
        CronError::UnknownToken(ref t) if t == "monday"
    ));
    assert!(matches!(
        CronExpr::parse("* * *").unwrap_err(),
        CronError::FieldCount(3)
    ));
}

#[test]
fn test_no_command_is_an_execution_error_not_a_parse_error() {
    let mut cache = ExprCache::new();
    let at = parse_timestamp("2020-08-01 11:01:00").unwrap();

    let err = cache.lookup("* * * * *").unwrap().match_run(at).unwrap_err();
    assert!(matches!(err, CronError::NoCommand));

    // The cached expression survives the failure and accepts an action.
    let runs = Arc::new(AtomicUsize::new(0));
    cache
        .lookup("* * * * *")
        .unwrap()
        .add_action(counting_action(&runs));
    assert!(cache.lookup("* * * * *").unwrap().match_run(at).unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// ─── Canonical text & builder mutation ───────────────────────────

#[test]
fn test_rule_roundtrips_through_reparse() {
    for text in [
        "* * * * *",
        "1 11-12 */2 * *",
        "*/2 * * * *",
        "0 0 1,15 * 0-5 2020",
    ] {
        let rule = CronExpr::parse(text).unwrap().rule();
        assert_eq!(rule, text);
        assert_eq!(CronExpr::parse(&rule).unwrap().rule(), rule);
    }
}

#[test]
fn test_builder_mutation_roundtrips() {
    let mut expr = CronExpr::parse("* * * * *").unwrap();
    expr.set_minutes(FieldMatcher::Value(0))
        .unwrap()
        .set_hours(FieldMatcher::List(vec![6, 18]))
        .unwrap()
        .set_year(FieldMatcher::Range { begin: 2020, end: 2030 })
        .unwrap();
    assert_eq!(expr.rule(), "0 6,18 * * * 2020-2030");

    let reparsed = CronExpr::parse(&expr.rule()).unwrap();
    assert!(reparsed.has_year());
    assert_eq!(reparsed.rule(), expr.rule());
}

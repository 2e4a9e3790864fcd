// Integration tests (native) for the `picture-order-quiz` crate.
// These tests avoid wasm-specific functionality and drive a full session
// through the public API with a simulated clock.

use picture_order_quiz::SessionError;
use picture_order_quiz::quiz::{
    DropOutcome, GAME_INSTRUCTIONS, Page, PointerSample, QuizConfig, QuizSession, RejectReason,
    SessionPhase, Signal, StaticDataset, Verdict, builtin,
};

fn two_pages() -> StaticDataset {
    StaticDataset::from_pages([
        Page::from_static(&["a", "b", "c"], &["c", "b", "a"]),
        Page::from_static(&["d"], &["d", "e"]),
    ])
    .expect("valid dataset")
}

fn option_index(session: &QuizSession<StaticDataset>, name: &str) -> usize {
    session
        .current_page()
        .and_then(|p| p.images.iter().position(|i| i.as_str() == name))
        .expect("option on current page")
}

// Drop by hovering at a pointer x rather than appending.
fn drop_at(session: &mut QuizSession<StaticDataset>, name: &str, x: f64) -> DropOutcome {
    let idx = option_index(session, name);
    let drag = session.begin_option_drag(idx).expect("session idle");
    let drag = session.hover(drag, PointerSample::new(x, 40.0));
    session.drop_item(drag)
}

fn names(session: &QuizSession<StaticDataset>) -> Vec<String> {
    session.placement().items().iter().map(|i| i.to_string()).collect()
}

#[test]
fn hover_positions_build_answer_in_any_drop_order() {
    let mut s = QuizSession::new(two_pages(), QuizConfig::default(), 0).expect("session");
    assert_eq!(drop_at(&mut s, "c", 500.0), DropOutcome::Inserted { index: 0 });
    assert_eq!(drop_at(&mut s, "a", 5.0), DropOutcome::Inserted { index: 0 });
    // between a (0..110) and c (110..220): boundary-exact lands after a
    assert_eq!(drop_at(&mut s, "b", 110.0), DropOutcome::Inserted { index: 1 });
    assert_eq!(names(&s), ["a", "b", "c"]);
    assert_eq!(
        drop_at(&mut s, "a", 0.0),
        DropOutcome::Rejected(RejectReason::CapacityExceeded)
    );
    assert_eq!(s.placement().len(), 3);
}

#[test]
fn reorder_then_submit_full_playthrough() {
    let mut s = QuizSession::new(two_pages(), QuizConfig::default(), 0).expect("session");
    for name in ["b", "a", "c"] {
        drop_at(&mut s, name, 10_000.0);
    }
    // wrong order first
    let (verdict, _) = s.submit().expect("idle");
    assert_eq!(verdict, Verdict::Incorrect);
    s.advance(2_500);
    assert!(s.placement().is_empty());
    assert_eq!(s.phase(), SessionPhase::Idle);

    // rebuild, fix with a hover swap
    for name in ["b", "a", "c"] {
        drop_at(&mut s, name, 10_000.0);
    }
    let drag = s.begin_placed_drag(1).expect("placed slot");
    let drag = s.hover_slot(drag, 0);
    assert_eq!(s.drop_item(drag), DropOutcome::Reordered { index: 0 });
    assert_eq!(names(&s), ["a", "b", "c"]);

    let (verdict, _) = s.submit().expect("idle");
    assert_eq!(verdict, Verdict::Correct);
    let signals = s.advance(6_500);
    assert!(signals.contains(&Signal::PageAdvanced { page: 2 }));
    assert_eq!(s.page_number(), 2);

    drop_at(&mut s, "d", 0.0);
    s.submit().expect("idle");
    let signals = s.advance(10_500);
    let completed = signals
        .iter()
        .find(|sig| matches!(sig, Signal::Completed { .. }))
        .expect("completion signal");
    assert_eq!(completed, &Signal::Completed { elapsed_secs: 10, attempts: 3 });
    assert_eq!(s.submit(), Err(SessionError::Finished));
}

#[test]
fn no_ticks_after_termination() {
    let config = QuizConfig { flash_ms: 10, celebrate_ms: 10, ..QuizConfig::default() };
    let ds = StaticDataset::from_pages([Page::from_static(&["a"], &["a"])]).expect("valid dataset");
    let mut s = QuizSession::new(ds, config, 0).expect("session");
    drop_at(&mut s, "a", 0.0);
    s.submit().expect("idle");
    s.advance(20);
    assert!(s.is_finished());
    let frozen = s.elapsed_secs();
    for t in [1_000, 5_000, 60_000] {
        assert!(s.advance(t).iter().all(|sig| !matches!(sig, Signal::Tick { .. })));
    }
    assert_eq!(s.elapsed_secs(), frozen);
}

#[test]
fn builtin_dataset_starts_a_session() {
    let s = QuizSession::new(builtin(), QuizConfig::default(), 0).expect("builtin dataset");
    assert_eq!(s.page_number(), 1);
    assert_eq!(
        s.answer_box().max_items(),
        s.current_page().map(|p| p.question.len()).unwrap_or_default()
    );
}

#[test]
fn instructions_name_every_area_of_the_page() {
    for area in ["Options", "Answer Box", "Question", "Submit"] {
        assert!(GAME_INSTRUCTIONS.contains(area), "instructions do not mention '{}'", area);
    }
}

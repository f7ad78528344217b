use caw_space::schedule::*;

#[test]
fn nothing_is_due_early() {
    let mut s = Scheduler::new();
    s.schedule(1_500, Transition::BeginPlay);
    assert!(s.take_due(1_499).is_empty());
    assert!(s.is_pending(Transition::BeginPlay));
}

#[test]
fn due_actions_are_taken_once() {
    let mut s = Scheduler::new();
    s.schedule(1_500, Transition::BeginPlay);
    assert_eq!(s.take_due(1_500), vec![Transition::BeginPlay]);
    assert!(s.take_due(10_000).is_empty());
    assert!(s.is_empty());
}

#[test]
fn due_actions_come_out_earliest_first() {
    let mut s = Scheduler::new();
    s.schedule(3_000, Transition::ReturnToTitle);
    s.schedule(1_000, Transition::BeginPlay);
    assert_eq!(
        s.take_due(5_000),
        vec![Transition::BeginPlay, Transition::ReturnToTitle]
    );
}

#[test]
fn rescheduling_replaces_the_pending_action() {
    let mut s = Scheduler::new();
    s.schedule(1_000, Transition::BeginPlay);
    s.schedule(2_000, Transition::BeginPlay);
    assert_eq!(s.len(), 1);
    assert!(s.take_due(1_500).is_empty());
    assert_eq!(s.take_due(2_000), vec![Transition::BeginPlay]);
}

#[test]
fn clear_drops_everything() {
    let mut s = Scheduler::new();
    s.schedule(10, Transition::BeginPlay);
    s.schedule(20, Transition::ReturnToTitle);
    s.clear();
    assert!(s.take_due(100).is_empty());
}

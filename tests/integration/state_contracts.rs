//! Integration tests for mutation-detection and dispatch contracts

use gamestate::{Character, GameContext, StateTopic, ValidationError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_unchanged_write_never_notifies() {
    let mut context = GameContext::new(10, 0);
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    context.on_coins_changed(move |_| sink.set(sink.get() + 1));

    context.state_mut().set_coins(10);
    context.transact(|shop| shop.use_coins(0)).unwrap();
    assert!(context.tracker().dirty_topics().is_empty());
    assert_eq!(context.flush(), 0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_changed_then_restored_value_still_notifies() {
    let mut context = GameContext::new(10, 0);
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    context.on_coins_changed(move |state| {
        sink.set(sink.get() + 1);
        assert_eq!(state.coins(), 10);
    });

    context.transact(|shop| {
        shop.use_coins(3).unwrap();
        shop.use_coins(-3).unwrap();
    });
    context.flush();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_rejected_roster_operations_leave_state_untouched() {
    let mut context = GameContext::new(10, 0);
    context.state_mut().unlock_character(1).unwrap();
    context.flush();

    {
        let mut state = context.state_mut();
        assert_eq!(
            state.unlock_character(1),
            Err(ValidationError::DuplicateCharacter(1))
        );
        assert_eq!(
            state.upgrade_character(2),
            Err(ValidationError::UnknownCharacter(2))
        );
        assert_eq!(state.set_characters(None), Err(ValidationError::MissingRoster));
    }

    assert!(context.tracker().dirty_topics().is_empty());
    assert_eq!(context.state().characters(), &[Character { id: 1, level: 1 }]);
}

#[test]
fn test_resubscribing_fixed_topics_keeps_observers() {
    let mut context = GameContext::new(10, 0);
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    context.on_stars_changed(move |_| sink.set(sink.get() + 1));

    for topic in StateTopic::ALL {
        context.tracker().subscribe(topic);
    }
    assert_eq!(context.tracker().callback_count(StateTopic::Stars), 1);

    context.transact(|shop| shop.buy_stars(1, 0)).unwrap();
    context.flush();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_distinct_registrations_of_same_behavior_run_separately() {
    let context = GameContext::new(10, 0);
    let calls = Rc::new(Cell::new(0));
    for _ in 0..2 {
        let sink = Rc::clone(&calls);
        context.on_coins_changed(move |_| sink.set(sink.get() + 1));
    }

    context.state_handle().borrow_mut().set_coins(1);
    context.flush();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_observer_mutation_is_delivered_on_next_flush() {
    let mut context = GameContext::new(10, 0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    context.on_stars_changed(move |state| sink.borrow_mut().push(state.stars()));

    // A coin reward that grants a star whenever coins change.
    let handle = context.state_handle();
    context.tracker().observe(StateTopic::Coins, move || {
        let mut state = handle.borrow_mut();
        let stars = state.stars() + 1;
        state.set_stars(stars);
    });

    context.transact(|shop| shop.use_coins(1)).unwrap();
    assert_eq!(context.flush(), 1);
    assert!(seen.borrow().is_empty());
    assert_eq!(context.tracker().dirty_topics(), vec![StateTopic::Stars]);

    assert_eq!(context.flush(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
    assert!(context.tracker().dirty_topics().is_empty());
}

#[test]
fn test_unregistered_observer_no_longer_runs() {
    let mut context = GameContext::new(10, 0);
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    let id = context.on_coins_changed(move |_| sink.set(sink.get() + 1));

    assert!(context.tracker().unregister(id));
    context.transact(|shop| shop.use_coins(1)).unwrap();
    assert_eq!(context.flush(), 0);
    assert_eq!(calls.get(), 0);
}

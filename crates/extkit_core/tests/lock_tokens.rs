use extkit_core::{with_lock, CloneExt, IterExt};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

const HOLD_FOR: Duration = Duration::from_millis(50);

/// Holds a token on a second thread, then runs `operation` with the same
/// token. The holder logs `holder` just before releasing, so a helper that
/// waits for the token always logs `operation` after it.
fn run_while_token_held<R>(
    operation: impl FnOnce(&Mutex<()>, &Mutex<Vec<&'static str>>) -> R,
) -> R {
    let token = Mutex::new(());
    let log = Mutex::new(Vec::new());
    let (held_tx, held_rx) = mpsc::channel();

    let result = thread::scope(|scope| {
        let token = &token;
        let log = &log;
        scope.spawn(move || {
            let _guard = token.lock().expect("token should be free");
            held_tx.send(()).expect("main thread waits for the signal");
            thread::sleep(HOLD_FOR);
            log.lock().expect("log").push("holder");
        });

        held_rx.recv().expect("holder should take the token");
        let result = operation(token, log);
        log.lock().expect("log").push("operation");
        result
    });

    let entries = log.into_inner().expect("log");
    assert_eq!(entries.first(), Some(&"holder"));
    assert_eq!(entries.last(), Some(&"operation"));
    result
}

fn shared_items() -> Vec<Arc<String>> {
    vec![Arc::new("a".to_string()), Arc::new("b".to_string())]
}

#[test]
fn deep_clone_locked_waits_for_token_holder() {
    let source = shared_items();
    let copy = run_while_token_held(|token, _| source.deep_clone_locked(token))
        .expect("token is released by the holder");
    assert_eq!(copy, source);
    assert!(!Arc::ptr_eq(&copy[0], &source[0]));
}

#[test]
fn shallow_clone_locked_waits_for_token_holder() {
    let source = shared_items();
    let copy = run_while_token_held(|token, _| source.shallow_clone_locked(token))
        .expect("token is released by the holder");
    assert!(Arc::ptr_eq(&copy[0], &source[0]));
}

#[test]
fn to_collection_locked_waits_for_token_holder() {
    let items = run_while_token_held(|token, _| (1..=3).to_collection_locked(token))
        .expect("token is released by the holder");
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn for_each_locked_runs_action_only_after_holder_releases() {
    run_while_token_held(|token, log| {
        ["x", "y"]
            .into_iter()
            .for_each_locked(token, |_| log.lock().expect("log").push("action"))
    })
    .expect("token is released by the holder");
}

#[test]
fn with_lock_runs_closure_only_after_holder_releases() {
    let value = run_while_token_held(|token, log| {
        with_lock(token, || {
            let entries = log.lock().expect("log");
            assert_eq!(entries.as_slice(), ["holder"]);
            entries.len()
        })
    })
    .expect("token is released by the holder");
    assert_eq!(value, 1);
}

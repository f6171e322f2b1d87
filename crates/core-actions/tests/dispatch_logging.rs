mod common;

use common::{Session, capture_logs};
use core_actions::{Action, Motion};
use tracing::Level;

#[test]
fn dispatch_traces_under_actions_target() {
    let mut s = Session::cpp("ab");
    let log = capture_logs(Level::TRACE, || {
        s.run(Action::InsertChar('x'));
        s.run(Action::extends(Motion::Right));
    });

    assert!(log.contains("actions.dispatch:"));
    assert!(log.contains("insert_char"));
    assert!(log.contains("dispatched"));
    assert!(log.contains("state.selection:"));
    assert!(log.contains("selection_updated"));
}

#[test]
fn clean_save_is_logged_and_skipped() {
    let mut s = Session::cpp("ab");
    let log = capture_logs(Level::DEBUG, || {
        s.run(Action::Save);
    });
    assert!(log.contains("DEBUG actions.dispatch:"));
    assert!(log.contains("save_skipped_clean"));
}

use crate::session::SessionState;

#[test]
fn second_fetch_is_rejected_while_guard_lives() {
    let session = SessionState::new();
    assert!(!session.fetch_started());

    let guard = session.try_begin_fetch().expect("first fetch");
    assert!(session.is_fetching());
    assert!(session.try_begin_fetch().is_none());

    drop(guard);
    assert!(!session.is_fetching());
    assert!(session.try_begin_fetch().is_some());
    assert!(session.fetch_started());
}

#[test]
fn quota_flag_flips_once() {
    let session = SessionState::new();
    assert!(!session.image_quota_exhausted());
    assert!(session.mark_image_quota_exhausted());
    assert!(!session.mark_image_quota_exhausted());
    assert!(session.image_quota_exhausted());
}

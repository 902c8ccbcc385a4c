use super::*;

#[test]
fn create_and_reuse_sessions() {
    let store = SessionStore::default();

    let (id, created) = store.load_or_create(None).unwrap();
    assert!(created);
    let (same_id, created) = store.load_or_create(Some(id)).unwrap();
    assert!(!created);
    assert_eq!(same_id, id);

    // Unknown ids (e.g. from before a restart) get a fresh session.
    let (other_id, created) = store.load_or_create(Some(Uuid::new_v4())).unwrap();
    assert!(created);
    assert_ne!(other_id, id);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn idle_sessions_expire() {
    let store = SessionStore::new(Duration::from_secs(60));
    let start = Instant::now();

    let (id, _) = store.load_or_create_at(None, start).unwrap();
    store
        .update_at(&id, start, |data| data.add_reservation(7))
        .unwrap();

    // Touching the session keeps it alive.
    let (kept, created) = store
        .load_or_create_at(Some(id), start + Duration::from_secs(50))
        .unwrap();
    assert_eq!((kept, created), (id, false));

    let (replaced, created) = store
        .load_or_create_at(Some(id), start + Duration::from_secs(200))
        .unwrap();
    assert!(created);
    assert_ne!(replaced, id);
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.get(&replaced).unwrap(), SessionData::default());
}

#[test]
fn update_and_read_session_data() {
    let store = SessionStore::default();
    let (id, _) = store.load_or_create(None).unwrap();

    store
        .update(&id, |data| {
            data.filter.guest_number = Some(3);
            data.add_reservation(1);
            data.add_reservation(2);
            data.add_reservation(1);
        })
        .unwrap();

    let data = store.get(&id).unwrap();
    assert_eq!(data.filter.guest_number, Some(3));
    assert_eq!(data.reservation_ids, vec![1, 2]);
    assert_eq!(data.reservation_count(), 2);

    assert!(store.update(&id, |data| data.remove_reservation(1)).unwrap());
    assert!(!store.update(&id, |data| data.remove_reservation(1)).unwrap());
    assert_eq!(store.get(&id).unwrap().reservation_ids, vec![2]);

    assert!(store.remove(&id).unwrap());
    assert!(store.is_empty().unwrap());
}

#[test]
fn flash_messages_are_shown_once() {
    let mut data = SessionData::default();
    assert_eq!(data.take_flash(), None);

    data.set_flash("Reservation completed successfully!");
    assert_eq!(data.peek_flash(), Some("Reservation completed successfully!"));
    assert_eq!(
        data.take_flash(),
        Some("Reservation completed successfully!".to_string())
    );
    assert_eq!(data.take_flash(), None);
}

#[test]
fn parse_session_cookie() {
    let id = Uuid::new_v4();

    let header = format!("theme=dark; {}={}; other=1", SESSION_COOKIE, id);
    assert_eq!(session_id_from_cookie_header(&header), Some(id));
    let quoted = format!("{}=\"{}\"", SESSION_COOKIE, id);
    assert_eq!(session_id_from_cookie_header(&quoted), Some(id));

    assert_eq!(session_id_from_cookie_header("theme=dark"), None);
    assert_eq!(
        session_id_from_cookie_header(&format!("{}=garbage", SESSION_COOKIE)),
        None
    );
}

#[test]
fn session_cookie_is_http_only() {
    let id = Uuid::new_v4();
    let cookie = session_cookie(&id, DEFAULT_IDLE_TIMEOUT);

    assert!(cookie.starts_with(&format!("{}={}", SESSION_COOKIE, id)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=1800"));
}

use domain::{MAX_REMOTE_NAME_LENGTH, Remote, RemoteAction, RemoteName};

#[test]
fn remote_name_accepts_up_to_capacity_minus_one() {
    let name = "a".repeat(MAX_REMOTE_NAME_LENGTH - 1);
    let bounded = RemoteName::new(name.clone()).expect("fits");
    assert_eq!(bounded.as_str(), name);
}

#[test]
fn remote_name_rejects_instead_of_truncating() {
    let name = "a".repeat(MAX_REMOTE_NAME_LENGTH);
    let err = RemoteName::new(name).expect_err("too long");
    assert_eq!(err.len, MAX_REMOTE_NAME_LENGTH);
    assert_eq!(err.max, MAX_REMOTE_NAME_LENGTH - 1);
}

#[test]
fn empty_remote_is_sentinel() {
    assert!(Remote::empty().is_empty());
    let remote = Remote::new(3, RemoteName::new("Kitchen").expect("name"), 0);
    assert!(!remote.is_empty());
}

#[test]
fn action_parses_known_words_only() {
    assert_eq!("up".parse::<RemoteAction>(), Ok(RemoteAction::Up));
    assert_eq!("pair".parse::<RemoteAction>(), Ok(RemoteAction::Pair));
    assert_eq!("reset".parse::<RemoteAction>(), Ok(RemoteAction::Reset));
    assert!("fly".parse::<RemoteAction>().is_err());
    assert!("UP".parse::<RemoteAction>().is_err());
    assert!("".parse::<RemoteAction>().is_err());
}

#[test]
fn action_words_round_trip() {
    for action in RemoteAction::ALL {
        assert_eq!(action.as_str().parse::<RemoteAction>(), Ok(action));
    }
}

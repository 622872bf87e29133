use gevity_core::{update, AppState, Msg, ProgressState, StatusRecord};

fn message(text: &str) -> StatusRecord {
    StatusRecord {
        message: Some(text.to_string()),
        ..StatusRecord::default()
    }
}

fn apply_all(records: Vec<StatusRecord>) -> AppState {
    records.into_iter().fold(AppState::new(), |state, record| {
        update(state, Msg::StatusReceived(record)).0
    })
}

#[test]
fn records_merge_per_field_in_delivery_order() {
    let state = apply_all(vec![
        message("cloning"),
        StatusRecord {
            step: Some(1),
            total_steps: Some(3),
            ..StatusRecord::default()
        },
        StatusRecord {
            progress: Some(40.0),
            ..StatusRecord::default()
        },
    ]);

    let progress = state.progress().expect("progress state");
    assert_eq!(progress.message(), Some("cloning"));
    assert_eq!(progress.step(), Some(1));
    assert_eq!(progress.total_steps(), Some(3));
    assert_eq!(progress.progress(), Some(40.0));
}

#[test]
fn last_non_empty_message_wins() {
    let state = apply_all(vec![
        message("cloning"),
        message("parsing"),
        message(""),
        StatusRecord {
            step: Some(2),
            ..StatusRecord::default()
        },
    ]);

    let progress = state.progress().expect("progress state");
    assert_eq!(progress.message(), Some("parsing"));
    assert_eq!(progress.step(), Some(2));
}

#[test]
fn each_field_keeps_its_last_defined_value() {
    let state = apply_all(vec![
        StatusRecord {
            step: Some(1),
            total_steps: Some(5),
            progress: Some(10.0),
            ..StatusRecord::default()
        },
        StatusRecord {
            step: Some(2),
            ..StatusRecord::default()
        },
        StatusRecord {
            progress: Some(55.0),
            ..StatusRecord::default()
        },
        message("embedding"),
    ]);

    let progress = state.progress().expect("progress state");
    assert_eq!(progress.step(), Some(2));
    assert_eq!(progress.total_steps(), Some(5));
    assert_eq!(progress.progress(), Some(55.0));
    assert_eq!(progress.message(), Some("embedding"));
}

#[test]
fn empty_records_never_create_progress() {
    let state = apply_all(vec![StatusRecord::default(), message("")]);
    assert_eq!(state.progress(), None);
    assert_eq!(state.view().progress, None);
}

#[test]
fn non_finite_progress_is_ignored() {
    let mut progress = ProgressState::default();
    assert!(progress.merge(&StatusRecord {
        progress: Some(20.0),
        ..StatusRecord::default()
    }));
    assert!(!progress.merge(&StatusRecord {
        progress: Some(f64::NAN),
        ..StatusRecord::default()
    }));
    assert_eq!(progress.progress(), Some(20.0));
}

#[test]
fn merging_an_empty_record_is_noop() {
    let mut progress = ProgressState::starting("cloning");
    let before = progress.clone();

    assert!(!progress.merge(&StatusRecord::default()));
    assert_eq!(progress, before);
}

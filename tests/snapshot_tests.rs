use blockdrop::core::{GameConfig, GameSnapshot, GameState, Randomizer};
use blockdrop::types::{GameStatus, PieceKind};

fn o_game() -> GameState {
    GameState::with_randomizer(&GameConfig::default(), Randomizer::scripted([PieceKind::O]))
        .unwrap()
}

#[test]
fn snapshot_of_idle_game() {
    let state = GameState::new(1);
    let snap = state.snapshot();

    assert_eq!(snap.status, GameStatus::Idle);
    assert_eq!((snap.width, snap.height, snap.hidden_rows), (10, 22, 2));
    assert_eq!(snap.cells.len(), 220);
    assert!(snap.active.is_none());
    assert!(snap.preview.is_empty());
    assert!(!snap.playable());
}

#[test]
fn snapshot_reports_active_piece_and_preview() {
    let mut state = o_game();
    state.start();
    let snap = state.snapshot();

    let active = snap.active.as_ref().unwrap();
    assert_eq!(active.kind, PieceKind::O);
    assert_eq!((active.x, active.y), (4, 0));
    assert_eq!(active.shape, vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(snap.preview, vec![PieceKind::O, PieceKind::O]);
    assert!(snap.playable());
}

#[test]
fn snapshot_into_reuses_buffer() {
    let mut state = o_game();
    state.start();

    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    assert_eq!(snap.cell(4, 21), None);

    state.hard_drop();
    state.snapshot_into(&mut snap);
    assert_eq!(snap.cell(4, 21), Some(PieceKind::O));
    assert_eq!(snap.cell(99, 0), None);
    assert_eq!(snap.cells.len(), 220);
    assert_eq!(snap, state.snapshot());
}

#[test]
fn visible_rows_skip_hidden_band() {
    let mut state = o_game();
    state.start();
    state.hard_drop();

    let snap = state.snapshot();
    let rows: Vec<_> = snap.visible_rows().collect();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[19][4], Some(PieceKind::O));
}

#[test]
fn snapshot_serializes_to_json() {
    let mut state = o_game();
    state.start();
    state.hard_drop();

    let snap = state.snapshot();
    let json = serde_json::to_value(&snap).unwrap();

    assert_eq!(json["status"], "Running");
    assert_eq!(json["width"], 10);
    assert_eq!(json["active"]["kind"], "O");
    assert_eq!(json["cells"][21 * 10 + 4], "O");
    assert!(json["cells"][0].is_null());

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}

//! Pieces tests - shape catalog and in-place rotation

use blockdrop::core::pieces::{get_shape, spawn_x, Shape};
use blockdrop::types::{Direction, PieceKind};

#[test]
fn test_catalog_matrices() {
    assert_eq!(
        get_shape(PieceKind::I).rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![1, 1, 1, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]
    );
    assert_eq!(get_shape(PieceKind::O).rows(), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(
        get_shape(PieceKind::T).rows(),
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]]
    );
    assert_eq!(
        get_shape(PieceKind::Z).rows(),
        vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 0]]
    );
}

#[test]
fn test_left_undoes_right() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.rotated(Direction::Right).rotated(Direction::Left), shape);
        assert_eq!(shape.rotated(Direction::Left).rotated(Direction::Right), shape);
    }
}

#[test]
fn test_four_turns_is_identity() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        for direction in [Direction::Left, Direction::Right] {
            let turned = (0..4).fold(shape, |s, _| s.rotated(direction));
            assert_eq!(turned, shape, "{:?} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_rotation_preserves_cell_count() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.rotated(Direction::Right).filled_count(), 4);
        assert_eq!(shape.rotated(Direction::Left).size(), shape.size());
    }
}

#[test]
fn test_i_turns_vertical_in_place() {
    let vertical = get_shape(PieceKind::I).rotated(Direction::Right);
    let cells: Vec<_> = vertical.filled_cells().collect();
    assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);

    let vertical = get_shape(PieceKind::I).rotated(Direction::Left);
    let cells: Vec<_> = vertical.filled_cells().collect();
    assert_eq!(cells, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
}

#[test]
fn test_t_clockwise() {
    let t = get_shape(PieceKind::T).rotated(Direction::Right);
    assert_eq!(t.rows(), vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
}

#[test]
fn test_o_is_rotation_invariant() {
    let o = get_shape(PieceKind::O);
    assert_eq!(o.rotated(Direction::Right), o);
    assert_eq!(o.rotated(Direction::Left), o);
}

#[test]
fn test_from_rows() {
    let shape = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]);
    assert_eq!(shape, Some(get_shape(PieceKind::T)));

    assert_eq!(Shape::from_rows(&[&[1, 1, 1], &[1, 1, 1]]), None);
    assert_eq!(Shape::from_rows(&[]), None);
}

#[test]
fn test_spawn_columns() {
    assert_eq!(spawn_x(10, 4), 3);
    assert_eq!(spawn_x(10, 3), 3);
    assert_eq!(spawn_x(10, 2), 4);
    assert_eq!(spawn_x(7, 2), 2);
}

use tetroship::{BitGrid, BitGridError, Mask};

#[test]
fn rejects_rows_wider_than_the_word() {
    let err = BitGrid::<u8>::new(9, 4).unwrap_err();
    assert_eq!(
        err,
        BitGridError::WidthTooLarge {
            width: 9,
            capacity: 8
        }
    );
    assert!(BitGrid::<u8>::new(8, 4).is_ok());
    assert!(Mask::new(32, 32).is_ok());
    assert!(Mask::new(33, 10).is_err());
}

#[test]
fn set_get_and_count() {
    let mut grid = Mask::new(10, 12).unwrap();
    assert!(grid.is_empty());
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 12);

    grid.set(0, 0).unwrap();
    grid.set(11, 9).unwrap();
    assert!(grid.get(0, 0).unwrap());
    assert!(grid.get(11, 9).unwrap());
    assert!(!grid.get(5, 5).unwrap());
    assert_eq!(grid.count_ones(), 2);
    assert!(!grid.is_empty());
}

#[test]
fn out_of_bounds_indices_error() {
    let mut grid = Mask::new(10, 10).unwrap();
    assert_eq!(
        grid.get(10, 0).unwrap_err(),
        BitGridError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(
        grid.set(0, 10).unwrap_err(),
        BitGridError::OutOfBounds { row: 0, col: 10 }
    );
}

#[test]
fn iterates_set_cells_in_row_major_order() {
    let mut grid = Mask::new(6, 4).unwrap();
    grid.set(2, 3).unwrap();
    grid.set(0, 1).unwrap();
    grid.set(2, 1).unwrap();
    let cells: Vec<_> = grid.iter_set().collect();
    assert_eq!(cells, vec![(0, 1), (2, 1), (2, 3)]);
}

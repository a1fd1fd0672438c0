use ir_battleship::{BitGrid, GridError};

#[test]
fn test_try_new_sizes() {
    // Seven rows fit in a byte per column
    let ok = BitGrid::<u8, 5, 7>::try_new();
    assert!(ok.is_ok());

    // Nine rows do not
    let err = BitGrid::<u8, 5, 9>::try_new();
    assert!(matches!(err, Err(GridError::SizeTooLarge { height: 9, capacity: 8 })));
}

#[test]
fn test_get_set_clear_toggle() {
    let mut g = BitGrid::<u8, 5, 7>::new();
    assert!(g.is_empty());

    g.set(4, 6).unwrap();
    assert!(g.get(4, 6).unwrap());
    assert_eq!(g.count_ones(), 1);

    g.toggle(4, 6).unwrap();
    assert!(!g.get(4, 6).unwrap());

    g.set(0, 0).unwrap();
    g.clear(0, 0).unwrap();
    assert!(g.is_empty());
}

#[test]
fn test_out_of_bounds() {
    let mut g = BitGrid::<u8, 5, 7>::new();
    assert_eq!(g.set(5, 0), Err(GridError::IndexOutOfBounds { x: 5, y: 0 }));
    assert_eq!(g.get(0, 7), Err(GridError::IndexOutOfBounds { x: 0, y: 7 }));
    assert!(g.column(5).is_err());
}

#[test]
fn test_columns_hold_rows_as_bits() {
    let g = BitGrid::<u8, 5, 7>::from_iter([(2, 0), (2, 3)]).unwrap();
    assert_eq!(g.column(2).unwrap(), 0b1001);
    assert_eq!(g.column(0).unwrap(), 0);
}

#[test]
fn test_iter_is_column_major() {
    let g = BitGrid::<u8, 5, 7>::from_iter([(3, 1), (0, 6), (0, 2)]).unwrap();
    let bits: Vec<_> = g.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 2), (0, 6), (3, 1)]);
}

#[test]
fn test_bit_ops() {
    let a = BitGrid::<u8, 5, 7>::from_iter([(0, 0), (1, 1)]).unwrap();
    let b = BitGrid::<u8, 5, 7>::from_iter([(1, 1), (2, 2)]).unwrap();
    assert_eq!((a & b).count_ones(), 1);
    assert_eq!((a | b).count_ones(), 3);
    assert_eq!((a ^ b).count_ones(), 2);

    let mut c = a;
    c |= b;
    c &= b;
    assert_eq!(c, b);
}

#[test]
fn test_not_stays_on_grid() {
    let empty = BitGrid::<u8, 5, 7>::new();
    let full = !empty;
    assert_eq!(full.count_ones(), 35);
    assert_eq!(full.column(0).unwrap(), 0b0111_1111);
}

#[test]
fn test_display_rows() {
    let g = BitGrid::<u8, 2, 2>::from_iter([(1, 0)]).unwrap();
    assert_eq!(g.to_string(), "□ ■ \n□ □ ");
}

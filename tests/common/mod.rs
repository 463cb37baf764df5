#![allow(dead_code)]

use approx::assert_relative_eq;
use planet_ratio::bodies::{CalculationKind, CelestialBody, ReferenceBase};
use planet_ratio::constants::Paragraph;
use planet_ratio::Board;

/// Board with the given selections applied in the order a student would click them.
pub fn board_with(
    body: CelestialBody,
    kind: CalculationKind,
    base: Option<ReferenceBase>,
) -> Board {
    let board = Board::new().unwrap();
    board.select_body(body).unwrap();
    board.select_calculation(kind).unwrap();
    if base.is_some() {
        board.select_base(base).unwrap();
    }
    board
}

pub fn assert_result_close(board: &Board, expected: f64, epsilon: f64) {
    let actual = board
        .current_result()
        .unwrap_or_else(|| panic!("no result on board {:?}", board.derivation()));
    assert_relative_eq!(actual, expected, max_relative = epsilon);
}

pub fn shape(paragraphs: &[Paragraph]) -> Vec<usize> {
    paragraphs.iter().map(Vec::len).collect()
}

pub fn field(paragraphs: &[Paragraph], paragraph: usize, index: usize) -> Option<&str> {
    paragraphs[paragraph][index].as_deref()
}

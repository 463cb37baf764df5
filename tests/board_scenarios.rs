use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use planet_ratio::bodies::{CalculationKind, ReferenceBase, EARTH, MARS, MOON, PLUTO, SUN};
use planet_ratio::constants::PARAGRAPH_SHAPE;
use planet_ratio::{Board, BoardConfig, NumberFormat};

mod common;
use common::{assert_result_close, board_with, field, shape};

#[test]
fn earth_diameter_against_the_sun() {
    let board = board_with(EARTH, CalculationKind::Diameter, None);
    let d = board.derivation().unwrap();

    assert_relative_eq!(d.numerator().unwrap(), 1.2756e7);
    assert_relative_eq!(d.denominator().unwrap(), 1.39e9);
    drop(d);
    assert_result_close(&board, 9.18e-3, 1e-3);

    let p = board.paragraphs();
    assert_eq!(shape(&p), PARAGRAPH_SHAPE.to_vec());
    assert_eq!(field(&p, 11, 2), Some("9,177x10<sup>-3</sup>"));
    assert_eq!(field(&p, 13, 5), Some("0,009"));
}

#[test]
fn earth_distance_is_its_own_reference() {
    let board = board_with(
        EARTH,
        CalculationKind::Distance,
        Some(ReferenceBase::EarthSunDistance),
    );
    let d = board.derivation().unwrap();
    assert_eq!(d.numerator(), Some(1.496e11));
    assert_eq!(d.denominator(), Some(1.496e11));
    assert_eq!(d.power_sum(), Some(0));
    drop(d);

    assert_eq!(board.current_result(), Some(1.0));
    let p = board.paragraphs();
    assert_eq!(field(&p, 0, 0), Some("Distância Terra-Sol"));
    assert_eq!(field(&p, 1, 0), Some("Distância Terra"));
    assert_eq!(field(&p, 13, 5), Some("1,000"));
    assert_eq!(field(&p, 17, 5), Some("1.000,0"));
}

#[test]
fn leaving_distance_clears_the_base_in_one_pass() {
    let board = board_with(
        MOON,
        CalculationKind::Distance,
        Some(ReferenceBase::EarthSunDistance),
    );
    assert!(board.current_result().is_some());
    let passes = board.recomputations();

    board.select_calculation(CalculationKind::Diameter).unwrap();

    assert_eq!(board.recomputations(), passes + 1);
    assert_eq!(board.selected_base(), None);
    assert_eq!(board.derivation().unwrap().base(), None);
    assert_eq!(field(&board.paragraphs(), 0, 0), Some("Diâmetro Sol"));
    assert_result_close(&board, 3.475e6 / 1.39e9, 1e-12);
}

#[test]
fn distance_needs_a_new_base_after_switching_back() {
    let board = board_with(
        MARS,
        CalculationKind::Distance,
        Some(ReferenceBase::SunDiameter),
    );
    board.select_calculation(CalculationKind::Diameter).unwrap();
    board.select_calculation(CalculationKind::Distance).unwrap();

    assert_eq!(board.current_result(), None);
    let p = board.paragraphs();
    assert_eq!(field(&p, 0, 0), None);
    assert_eq!(field(&p, 1, 0), Some("Distância Marte"));
    assert_eq!(shape(&p), PARAGRAPH_SHAPE.to_vec());
}

#[test]
fn scale_is_proportional() {
    let board = board_with(MARS, CalculationKind::Diameter, None);
    let at_unit_scale = board.current_result().unwrap();

    board.set_scale(0.01).unwrap();

    assert_result_close(&board, at_unit_scale * 0.01, 1e-12);
    assert_eq!(board.selected_body(), Some(MARS));
    assert_eq!(board.selected_calculation(), Some(CalculationKind::Diameter));
    assert_eq!(field(&board.paragraphs(), 0, 1), Some("0,01"));
}

#[test]
fn deselecting_the_body_empties_the_board() {
    let board = board_with(PLUTO, CalculationKind::Diameter, None);
    board.select_body(None).unwrap();

    assert_eq!(board.current_result(), None);
    let p = board.paragraphs();
    assert_eq!(field(&p, 1, 0), None);
    assert_eq!(field(&p, 2, 0), Some("1,39x10<sup>9</sup>"));
    assert_eq!(field(&p, 3, 0), None);
    assert_eq!(field(&p, 12, 0), Some("Portanto:"));
}

#[test]
fn the_sun_at_its_own_distance_has_no_result_problem() {
    let board = board_with(
        SUN,
        CalculationKind::Distance,
        Some(ReferenceBase::EarthSunDistance),
    );
    assert_eq!(board.current_result(), Some(0.0));
    assert_eq!(shape(&board.paragraphs()), PARAGRAPH_SHAPE.to_vec());
}

#[test]
fn refresh_is_idempotent() {
    let board = board_with(
        EARTH,
        CalculationKind::Distance,
        Some(ReferenceBase::SunDiameter),
    );
    board.refresh().unwrap();
    let first = board.paragraphs();
    let passes = board.recomputations();

    board.refresh().unwrap();

    assert_eq!(board.paragraphs(), first);
    assert_eq!(board.recomputations(), passes + 1);
}

#[test]
fn cache_matches_a_fresh_board_after_every_set() {
    let board = Board::new().unwrap();
    board.select_body(EARTH).unwrap();
    board.select_calculation(CalculationKind::Distance).unwrap();
    board.select_base(ReferenceBase::SunDiameter).unwrap();
    board.set_scale(3.0).unwrap();
    board.select_body(MARS).unwrap();

    let fresh = board_with(
        MARS,
        CalculationKind::Distance,
        Some(ReferenceBase::SunDiameter),
    );
    fresh.set_scale(3.0).unwrap();

    assert_eq!(board.paragraphs(), fresh.paragraphs());
    assert_eq!(board.current_result(), fresh.current_result());
    assert_result_close(&board, 2.279e11 * 3.0 / 1.39e9, 1e-12);
}

#[test]
fn every_pass_is_published() {
    let board = Board::new().unwrap();
    let seen = Rc::new(Cell::new(0));
    let last_len = Rc::new(Cell::new(0));

    let counter = Rc::clone(&seen);
    let len = Rc::clone(&last_len);
    board
        .on_publish(move |paragraphs, _| {
            counter.set(counter.get() + 1);
            len.set(paragraphs.len());
        })
        .unwrap();

    board.select_body(EARTH).unwrap();
    board.select_calculation(CalculationKind::Diameter).unwrap();
    board.set_scale(2.0).unwrap();
    board.set_unknown_symbol("y").unwrap();

    assert_eq!(seen.get(), 4);
    assert_eq!(last_len.get(), 18);
}

#[test]
fn english_separators_from_toml() {
    let config = BoardConfig::from_toml_str(
        r#"
        [number_format]
        decimal_separator = "."
        thousands_separator = ","
        "#,
    )
    .unwrap();
    assert_eq!(config.number_format, NumberFormat::EN_US);

    let board = Board::with_config(config).unwrap();
    board.select_body(EARTH).unwrap();
    board.select_calculation(CalculationKind::Diameter).unwrap();
    board.set_scale_input("1,000").unwrap();

    assert_eq!(board.scale(), 1000.0);
    let p = board.paragraphs();
    assert_eq!(field(&p, 11, 2), Some("9.177x10<sup>0</sup>"));
    assert_eq!(field(&p, 17, 5), Some("9,177.0"));
}

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planet_ratio::formatting::{self, Field};
use planet_ratio::NumberFormat;

fn random_magnitude(rng: &mut StdRng) -> f64 {
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    sign * rng.random_range(1.0..10.0) * 10f64.powi(rng.random_range(-200..200))
}

#[test]
fn mantissa_times_power_of_ten_gives_back_the_number() {
    let mut rng = StdRng::seed_from_u64(42_u64);

    for _ in 0..2_000 {
        let x = random_magnitude(&mut rng);

        let mantissa: f64 = match formatting::mantissa_of(x) {
            Field::Text(m) => m.parse().unwrap(),
            other => panic!("mantissa of {x} is {other:?}"),
        };
        let exponent = formatting::exponent_of(x).as_number().unwrap() as i32;

        assert!((1.0..10.0).contains(&mantissa.abs()), "mantissa {mantissa} of {x}");
        assert_relative_eq!(mantissa * 10f64.powi(exponent), x, max_relative = 1e-12);
    }
}

#[test]
fn fixed_exponent_keeps_the_value() {
    let mut rng = StdRng::seed_from_u64(7_u64);
    let br = NumberFormat::PT_BR;

    for _ in 0..500 {
        let x = random_magnitude(&mut rng).abs();
        let natural = br.exponent(x);
        let target = natural + rng.random_range(-4..=4);

        let rendered = br.fixed_exponent(x, target);
        let suffix = format!("x10<sup>{target}</sup>");
        let digits = rendered
            .strip_suffix(&suffix)
            .unwrap_or_else(|| panic!("{rendered} does not end with {suffix}"));

        let shown = br.parse(digits).unwrap();
        assert_relative_eq!(shown * 10f64.powi(target), x, max_relative = 1e-12);
    }
}

#[test]
fn text_and_absent_pass_through_every_formatter() {
    let samples = [
        Field::Absent,
        Field::from("Diâmetro Terra"),
        Field::from(""),
        Field::from("x10<sup>3</sup>"),
    ];

    for format in [NumberFormat::PT_BR, NumberFormat::EN_US] {
        for value in &samples {
            assert_eq!(format.exponent_of(value.clone()), *value);
            assert_eq!(format.mantissa_of(value.clone()), *value);
            assert_eq!(format.to_scientific_notation(value.clone()), *value);
            assert_eq!(format.to_fixed_exponent_notation(value.clone(), 9), *value);
            assert_eq!(format.add_thousands_separator(value.clone()), *value);
            assert_eq!(format.format_decimal(value.clone(), None), *value);
            assert_eq!(format.to_locale_decimal(value.clone()), *value);
        }
    }
}

#[test]
fn chained_formatting_of_an_absent_value_stays_absent() {
    let chained = formatting::to_scientific_notation(formatting::add_thousands_separator(
        formatting::exponent_of(None::<f64>),
    ));
    assert_eq!(chained, Field::Absent);
}

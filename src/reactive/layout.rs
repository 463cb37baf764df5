//! Paragraph layout of the board.
//!
//! Each paragraph lists the fields of one line of the worked derivation, left
//! to right. The rendering side binds them by position, so the field count of
//! every paragraph is fixed (see [`PARAGRAPH_SHAPE`]) whatever the selections.
//! Fields are HTML fragments; absent values stay `None`.

use crate::constants::{Paragraph, PARAGRAPH_COUNT, PARAGRAPH_SHAPE};
use crate::formatting::Field;
use crate::reactive::derivation::{DerivationState, LengthUnit};

const NBSP: &str = "&nbsp;";
const EQUALS: &str = "&nbsp;=&nbsp;";
const TIMES: &str = "&nbsp;x&nbsp;";

fn field(value: impl Into<Field>) -> Option<String> {
    value.into().into_display()
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// Wrap a field in `<sup>`, keeping absent values absent.
fn superscript(value: Field) -> Option<String> {
    field(value).map(|v| format!("<sup>{v}</sup>"))
}

/// Build the 18 paragraphs from the (lazily computed) derived fields of `state`.
pub fn assemble(state: &DerivationState) -> Vec<Paragraph> {
    let symbol = || text(state.unknown_symbol());
    let scale = || Some(state.scale_text());

    let standard = || field(state.scientific(state.standard_value()));
    let body_value = || field(state.scientific(state.body_value()));
    let numerator = || field(state.scientific(state.numerator()));
    let denominator = || field(state.scientific(state.denominator()));
    let quotient = || field(state.mantissa_quotient_text());

    let mut p: Vec<Paragraph> = Vec::with_capacity(PARAGRAPH_COUNT);

    // known term and scale
    p.push(vec![field(state.reference_label().map(str::to_string)), scale()]);
    // unknown term
    p.push(vec![field(state.quantity_label()), symbol(), text("m")]);
    // the proportion, line by line
    p.push(vec![standard(), text("&nbsp;m"), scale(), text("m")]);
    p.push(vec![body_value(), text("&nbsp;m"), symbol(), text("m")]);
    // cross multiplication
    p.push(vec![
        standard(),
        symbol(),
        text(EQUALS),
        body_value(),
        text("&nbsp;&nbsp;*&nbsp;&nbsp;"),
        scale(),
    ]);
    p.push(vec![standard(), symbol(), text(EQUALS), numerator()]);
    // isolating the unknown: numerator over denominator
    p.push(vec![numerator()]);
    p.push(vec![symbol(), text("=&nbsp;"), text(NBSP)]);
    p.push(vec![denominator()]);
    // powers of ten moved up
    p.push(vec![
        symbol(),
        text("="),
        quotient(),
        text(TIMES),
        field(DerivationState::base10_text(state.numerator_exponent())),
        text(TIMES),
        field(DerivationState::base10_text(state.raised_denominator_exponent())),
        text("="),
        quotient(),
        text("&nbsp;x&nbsp;10"),
        superscript(DerivationState::power_text(state.numerator_exponent(), true)),
        superscript(Field::from("&nbsp;+&nbsp;")),
        superscript(DerivationState::power_text(
            state.raised_denominator_exponent(),
            true,
        )),
        text("&nbsp;="),
    ]);
    p.push(vec![
        symbol(),
        text("="),
        quotient(),
        text("x10"),
        superscript(DerivationState::power_text(state.power_sum(), true)),
        text("&nbsp;&nbsp;&rArr;"),
    ]);
    p.push(vec![
        symbol(),
        text("="),
        field(state.result_scientific(LengthUnit::Meter)),
        text("m"),
    ]);
    p.push(vec![text("Portanto:")]);

    // the result in each unit, separated by "ou"
    for (i, unit) in LengthUnit::ALL.into_iter().enumerate() {
        if i > 0 {
            p.push(vec![text("ou")]);
        }
        p.push(vec![
            symbol(),
            text(EQUALS),
            field(state.result_scientific(unit)),
            Some(format!("{NBSP}{}{NBSP}{NBSP}", unit.symbol())),
            text(EQUALS),
            field(state.result_decimal(unit)),
            Some(format!("{NBSP}{}{NBSP}", unit.plural_name())),
        ]);
    }

    debug_assert_eq!(
        p.iter().map(Vec::len).collect::<Vec<_>>(),
        PARAGRAPH_SHAPE.to_vec()
    );
    p
}

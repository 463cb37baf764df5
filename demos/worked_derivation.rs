use std::env;

use planet_ratio::bodies::{CalculationKind, ReferenceBase};
use planet_ratio::panels::{decorated_header, DiameterPanel, DistancePanel, ReferencePanel};
use planet_ratio::registry::Catalog;
use planet_ratio::{Board, RatioError};
use tracing_subscriber::EnvFilter;

/// Print the worked derivation for one selection.
/// Usage:
///   worked_derivation <BODY_KEY> [DIAMETER|DISTANCE] [SUN_DIAMETER|EARTH_SUN_DISTANCE] [SCALE]
/// Example:
///   RUST_LOG=planet_ratio=debug worked_derivation MARS DISTANCE EARTH_SUN_DISTANCE 0,01
fn main() -> Result<(), RatioError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.to_string());

    let catalog = Catalog::global()?;
    let body = catalog.require_body(&arg(0, "EARTH"))?;
    let kind = catalog.require_calculation(&arg(1, "DIAMETER"))?;

    let board = Board::new()?;
    board.select_body(body)?;
    board.select_calculation(kind)?;
    if kind == CalculationKind::Distance {
        board.select_base(catalog.require_base(&arg(2, "EARTH_SUN_DISTANCE"))?)?;
    }
    if let Some(scale) = args.get(3) {
        board.set_scale_input(scale)?;
    }

    let fmt = board.number_format();
    println!("{}", decorated_header(&body));
    println!("{:?}", DiameterPanel::for_body(&body, &fmt));
    println!("{:?}", DistancePanel::for_body(&body, &fmt));
    let base = board.selected_base().unwrap_or(ReferenceBase::SunDiameter);
    println!("{:?}", ReferencePanel::for_base(base, &fmt));
    println!();

    for (i, paragraph) in board.paragraphs().iter().enumerate() {
        let line = paragraph
            .iter()
            .map(|f| f.as_deref().unwrap_or("_"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("p{i:02}: {line}");
    }

    match board.current_result() {
        Some(result) => println!("\nresult = {result} m"),
        None => println!("\nno result"),
    }
    Ok(())
}

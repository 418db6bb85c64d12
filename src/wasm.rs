use wasm_bindgen::prelude::*;

use crate::parse::parse_colony;

/// Parse a colony description and return its movement log, one turn per line.
///
/// Throws a JavaScript `Error` if the description is invalid or no route exists.
#[wasm_bindgen]
pub fn solve(input: &str) -> Result<String, JsValue> {
    let colony = parse_colony(input).map_err(|e| js_sys::Error::new(&e.to_string()))?;
    let schedule = colony.solve().map_err(|e| js_sys::Error::new(&e.to_string()))?;
    Ok(schedule.display(&colony).to_string())
}

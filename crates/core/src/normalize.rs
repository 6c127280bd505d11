//! Text cleanup applied to every extracted field before it reaches a record.

/// Placeholder written when the portal omits a value.
pub const NOT_SPECIFIED: &str = "No especificado";

const STRIPPED: [char; 6] = ['\n', '\r', '\t', ',', ';', '"'];

/// Cleans `text` so it can sit in one CSV cell unquoted.
///
/// Removes line breaks, tabs, commas, semicolons and double quotes, then
/// collapses whitespace runs to single spaces and trims both ends. The result
/// is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
	let stripped: String = text.chars().filter(|c| !STRIPPED.contains(c)).collect();
	stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

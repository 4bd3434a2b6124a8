use crate::api;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Error payload returned in place of a result
#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

fn to_json<T: Serialize>(result: Result<T, String>) -> String {
    let serialized = match result {
        Ok(value) => serde_json::to_string(&value),
        Err(error) => serde_json::to_string(&ErrorJson { error }),
    };
    serialized.unwrap_or_else(|e| format!(r#"{{"error":"Serialization error: {}"}}"#, e))
}

/// Solve one target hand against a board
///
/// # Arguments
/// * `board` - JSON object `{"hand": [...], "dora": [...], "wall": [...], "deadwall": [...]}`
/// * `target` - JSON array of tile codes (e.g., ["1m", "1m", "7z"])
/// * `max_times` - Maximum number of exchange rounds
/// * `max_choice` - Maximum tiles discarded per round
/// * `waiting` - JSON array of winning tile codes
///
/// # Returns
/// JSON string `{"take", "solution", "waited"}` (take = -1 when unsolvable),
/// or `{"error"}` for malformed input
#[wasm_bindgen]
pub fn solve(board: &str, target: &str, max_times: i32, max_choice: i32, waiting: &str) -> String {
    to_json(api::solve_request(
        board,
        target,
        max_times as i64,
        max_choice as i64,
        waiting,
    ))
}

/// Rank candidate target hands against a board
///
/// # Arguments
/// * `request` - JSON object with `tiles` (flat sequence) or `board`, the
///   `candidates` text (one `TARGET [WAITS]` line each) and `options`
///
/// # Returns
/// JSON string `{"results": [...], "elapsedMs"}` or `{"error"}`
#[wasm_bindgen]
pub fn evaluate(request: &str) -> String {
    to_json(api::evaluate_request(request))
}

/// Replay exchange steps to get the hand positions to select in each round
#[wasm_bindgen]
pub fn replay(hand: &str, dead_wall: &str, steps: &str) -> String {
    to_json(api::replay_request(hand, dead_wall, steps))
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const BOARD: &str =
        r#"{"hand":["1m","1m","1m","2m","3m","9s"],"wall":["4s","5s"],"deadwall":["4p","5p","7z"]}"#;

    #[wasm_bindgen_test]
    fn test_solve_export() {
        let json = solve(BOARD, r#"["1m","2m","3m","7z"]"#, 1, 3, r#"["5s"]"#);
        assert_eq!(json, r#"{"take":0,"solution":[["1m","1m","9s"]],"waited":1}"#);
    }

    #[wasm_bindgen_test]
    fn test_solve_export_error() {
        let json = solve("not json", "[]", 1, 1, "[]");
        assert!(json.starts_with(r#"{"error":"Invalid board JSON"#));
    }

    #[wasm_bindgen_test]
    fn test_evaluate_export() {
        let request = format!(r#"{{"board":{},"candidates":"6z\n1m2m3m 5s"}}"#, BOARD);
        let json = evaluate(&request);
        assert!(json.contains(r#""target":"1m2m3m""#));
        assert!(json.contains("elapsedMs"));
    }

    #[wasm_bindgen_test]
    fn test_replay_export() {
        let json = replay(r#"["9s","1m"]"#, r#"["7z"]"#, r#"[["9s"]]"#);
        assert_eq!(json, r#"[{"positions":[1],"drawn":["7z"],"hand":["1m","7z"]}]"#);
    }
}

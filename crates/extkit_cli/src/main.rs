//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `extkit_core` linkage.
//! - Classify line endings of each argument, or of a built-in sample.

use extkit_core::{determine_line_endings, normalize_line_endings, IterExt, LineEndingStyle};

const SAMPLE: &str = "first\r\nsecond\rthird\n";

fn main() {
    println!("extkit_core version={}", extkit_core::core_version());

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if inputs.is_empty() {
        vec![SAMPLE.to_string()]
    } else {
        inputs
    };

    for (input, index) in inputs.iter().with_index() {
        let style = determine_line_endings(input);
        match normalize_line_endings(input, LineEndingStyle::Unix) {
            Ok(normalized) => println!(
                "input={index} style={style} unix_lines={}",
                normalized.lines().count()
            ),
            Err(err) => {
                eprintln!("input={index} error={err}");
                std::process::exit(1);
            }
        }
    }
}

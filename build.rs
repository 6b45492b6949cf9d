//! Build script to generate embedded word banks
//!
//! Reads tab-separated word bank files (`WORD<TAB>definition<TAB>syn|syn|...`)
//! and generates Rust source code with const arrays.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

const LANGUAGES: [(&str, &str); 4] = [
    ("en", "EN"),
    ("fr", "FR"),
    ("es", "ES"),
    ("cz", "CZ"),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("wordbanks.rs");

    let mut output = fs::File::create(&output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated word banks").unwrap();
    writeln!(output).unwrap();

    for (code, const_name) in LANGUAGES {
        let input_path = format!("data/wordbanks/{code}.tsv");
        generate_bank(&mut output, &input_path, const_name, code);

        // Rebuild if word banks change
        println!("cargo:rerun-if-changed={input_path}");
    }
}

fn generate_bank(output: &mut fs::File, input_path: &str, const_name: &str, code: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let rows: Vec<Vec<&str>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').collect())
        .collect();

    writeln!(output, "/// Embedded `{code}` word bank ({} entries)", rows.len()).unwrap();
    writeln!(output, "pub const {const_name}: &[RawEntry] = &[").unwrap();

    for (line_no, fields) in rows.iter().enumerate() {
        assert!(
            fields.len() == 3,
            "{input_path}:{}: expected 3 tab-separated fields, got {}",
            line_no + 1,
            fields.len()
        );
        let synonyms: Vec<String> = fields[2]
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{s:?}"))
            .collect();
        writeln!(
            output,
            "    ({:?}, {:?}, &[{}]),",
            fields[0].trim(),
            fields[1].trim(),
            synonyms.join(", ")
        )
        .unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
}

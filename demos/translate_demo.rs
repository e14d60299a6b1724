use gcode_post::dialect::{DialectRegistry, DEFAULT_DIALECT};
use gcode_post::parser::parse_line;
use gcode_post::translate::translate_document;

fn main() {
    println!("=== Line Splitter ===");

    let test_lines = [
        "G1 F10.000 X1.000 Y2.000",
        "G2 X2.5 Y2.5 I0.5 J0",
        "(Profile001)",
        "",
        "G1 S200",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        println!("Parsed: {:?}", parse_line(line));
    }

    println!("\n=== Translation ({}) ===\n", DEFAULT_DIALECT);

    let registry = DialectRegistry::with_builtin().expect("built-in dialects");
    let dialect = registry.get(DEFAULT_DIALECT).expect("default dialect");
    let program = "(Square)\nG0 X0 Y0\nG1 F10 Z-0.1\nG1 X1\nG1 Y1\nG1 X0\nG1 Y0\n";

    match translate_document(program, dialect) {
        Ok(text) => print!("{}", text),
        Err(e) => eprintln!("Translation failed: {}", e),
    }
}

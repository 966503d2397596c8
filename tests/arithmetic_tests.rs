use plc::RunConfig;
use std::fs;
use std::path::Path;

fn run_demo(name: &str) -> plc::Outcome {
    let path = Path::new("demos").join(name);
    let source = fs::read_to_string(&path).expect("Failed to read demo program");

    let result = plc::run_source(&source, &RunConfig::captured());
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    result.unwrap()
}

#[test]
fn test_arithmetic_demo() {
    let outcome = run_demo("arithmetic.plc");
    let joined_output = outcome.output.join("\n");

    println!("Interpreter output:\n{}", joined_output);

    assert!(joined_output.contains("Integer sum: 12"));
    assert!(joined_output.contains("Integer quotient: 3"));
    assert!(joined_output.contains("Negative quotient: -3"));
    assert!(joined_output.contains("Power: 1024"));
    assert!(joined_output.contains("Decimal quotient: 0.2"));
    assert!(joined_output.contains("Scaled quotient: 3.333"));
    assert!(joined_output.contains("Decimal product: 2.25"));
    assert!(joined_output.contains("Half plus half: 1.0"));
    assert!(joined_output.contains("Logarithm: 0"));
    assert!(joined_output.contains("Integer comparison: TRUE"));
    assert!(joined_output.contains("Character comparison: FALSE"));
    assert_eq!(outcome.value.to_string(), "8");
}

#[test]
fn test_default_demo() {
    let outcome = run_demo("default.plc");

    assert_eq!(
        outcome.output,
        vec![
            "2 is two",
            "3 is three",
            "5 is odd",
            "7 is odd",
            "11 is odd",
            "[28, 3, 5, 7, 11]",
            "calls: 26",
        ]
    );
    assert_eq!(outcome.value.to_string(), "28");
}

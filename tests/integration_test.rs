use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use anyhow::{Result, anyhow};

#[test]
fn test_cli_correctly_processes_sample() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_advance-ledger");
    let sample_path = Path::new("samples").join("sample.csv");

    let output = Command::new(binary_path).arg(sample_path).output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("emp_no,balance,monthly_installment"));

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 3);
        assert!(fields[0].starts_with('E'));

        let balance: f64 = fields[1].parse()?;
        let _: f64 = fields[2].parse()?;

        assert!(balance >= 0.0);
    }

    Ok(())
}

#[test]
fn test_cli_outputs_correct_final_balances() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_advance-ledger");
    let fixture_path = Path::new("samples").join("fixed.csv");

    let output = Command::new(binary_path).arg(fixture_path).output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut results = HashMap::new();

    for line in stdout.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        results.insert(fields[0].to_string(), (fields[1].to_string(), fields[2].to_string()));
    }

    let emp_1_results = results.get("E001").ok_or_else(|| anyhow!("E001 missing from output"))?;

    // 3000 - 500 - 500 + 250
    assert_eq!(emp_1_results.0, "2250.00");
    assert_eq!(emp_1_results.1, "500.00");

    let emp_2_results = results.get("E002").ok_or_else(|| anyhow!("E002 missing from output"))?;

    // 1,200 principal untouched by the deferral.
    assert_eq!(emp_2_results.0, "1200.00");
    assert_eq!(emp_2_results.1, "100.00");

    Ok(())
}

use std::io::Write;
use std::process::Command;

const INPUT: &str = "\
product;date;value;category;payment_method;priority;my_expense;fixed_expense;details
Groceries store;10/05/2023;150,75;food;debit;yes;yes;no;weekly run
Cinema;10/12/2023;30.50;leisure;debit;no;yes;no;
Laptop;11/02/2023;3500,00;electronics;credit;yes;yes;no;work machine
Headphones;09/15/2023;899,90;electronics;credit;no;yes;no;before cutoff
Dinner;10/20/2023;120,35;food;credit;no;yes;no;birthday
Gift for friend;10/07/2023;80,00;gifts;debit;no;no;no;third party
";

// The expected summary, whitespace-normalized. The Headphones row is a credit
// expense dated before 2023-10-01, so it is excluded from the credit total
// and listings. The gift row is a third-party expense and appears nowhere.
const EXPECTED_OUTPUT: &str = "\
==================================================
Sum of all debit expenses: $181.25
Most expensive items paid in debit:
10/05/2023 Groceries store 150.75 food
10/12/2023 Cinema 30.50 leisure
Most expensive categories paid in debit:
food 150.75
leisure 30.50
==================================================
==================================================
Sum of all credit expenses: $3620.35
Most expensive items paid in credit:
11/02/2023 Laptop 3500.00 electronics
10/20/2023 Dinner 120.35 food
Most expensive categories paid in credit:
electronics 3500.00
food 120.35
==================================================
";

/// Collapses runs of whitespace and drops blank lines so column padding does
/// not matter in comparisons.
fn normalize(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

fn write_input(content: &str) -> tempfile::NamedTempFile {
    let mut temp_file = tempfile::NamedTempFile::new()
        .expect("Failed to create temporary file");
    temp_file.write_all(content.as_bytes())
        .expect("Failed to write to temporary file");
    temp_file
}

#[test]
fn test_summary_end_to_end() {
    let bin_path = env!("CARGO_BIN_EXE_expense_manager");
    let temp_file = write_input(INPUT);

    let output = Command::new(bin_path)
        .arg(temp_file.path())
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr));

    let actual_output = String::from_utf8_lossy(&output.stdout);
    let actual_lines = normalize(&actual_output);
    let expected_lines = normalize(EXPECTED_OUTPUT);

    assert_eq!(
        actual_lines, expected_lines,
        "Output differs.\nExpected:\n{}\n\nActual:\n{}",
        EXPECTED_OUTPUT, actual_output
    );
}

#[test]
fn test_bad_numeric_cell_aborts_without_output() {
    let bin_path = env!("CARGO_BIN_EXE_expense_manager");
    let temp_file = write_input(
        "product;date;value;category;payment_method;priority;my_expense;fixed_expense;details\n\
         Cinema;10/12/2023;not a number;leisure;debit;no;yes;no;\n",
    );

    let output = Command::new(bin_path)
        .arg(temp_file.path())
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "No summary may be printed on a failed load");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("value"), "stderr should name the failing column: {stderr}");
}

#[test]
fn test_missing_file_aborts() {
    let bin_path = env!("CARGO_BIN_EXE_expense_manager");

    let output = Command::new(bin_path)
        .arg("/nonexistent/expenses.csv")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn outlay(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("outlay").unwrap();
    cmd.env("OUTLAY_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn init_seeds_starter_categories() {
    let dir = TempDir::new().unwrap();

    outlay(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    outlay(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Groceries"))
        .stdout(contains("Rent"));
}

#[test]
fn expense_add_shows_on_dashboard() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args([
            "expense",
            "add",
            "Weekly shop",
            "12.50",
            "--category",
            "Groceries",
            "--date",
            "2025-06-10",
        ])
        .assert()
        .success()
        .stdout(contains("Created expense:"));

    outlay(&dir)
        .args([
            "dashboard",
            "--period",
            "month",
            "--date",
            "2025-06-15",
        ])
        .assert()
        .success()
        .stdout(contains("Spent this month: $12.50 (1 expenses)"))
        .stdout(contains("Groceries"))
        .stdout(contains("Weekly shop"));
}

#[test]
fn dashboard_reports_full_jump_without_history() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args(["expense", "add", "Coffee", "4.50", "--date", "2025-06-10"])
        .assert()
        .success();

    // No spending last month, so the change reads as a full jump
    outlay(&dir)
        .args(["dashboard", "--period", "month", "--date", "2025-06-15"])
        .assert()
        .success()
        .stdout(contains("Change: +100.0%"));
}

#[test]
fn deleted_category_shows_as_unknown() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args([
            "expense",
            "add",
            "Concert",
            "80",
            "--category",
            "Entertainment",
            "--date",
            "2025-06-10",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args(["category", "delete", "Entertainment", "--force"])
        .assert()
        .success()
        .stdout(contains("Deleted category: Entertainment"));

    outlay(&dir)
        .args(["dashboard", "--period", "month", "--date", "2025-06-15"])
        .assert()
        .success()
        .stdout(contains("Unknown"));
}

#[test]
fn upcoming_bills_respect_the_window() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args(["bill", "add", "Due today", "10", "--due", "2025-06-15"])
        .assert()
        .success();
    outlay(&dir)
        .args(["bill", "add", "Edge of window", "20", "--due", "2025-07-15"])
        .assert()
        .success();
    outlay(&dir)
        .args(["bill", "add", "Beyond window", "30", "--due", "2025-07-16"])
        .assert()
        .success();

    let assert = outlay(&dir)
        .args(["bill", "upcoming", "--date", "2025-06-15"])
        .assert()
        .success()
        .stdout(contains("Due today"))
        .stdout(contains("Edge of window"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("Beyond window"));
}

#[test]
fn goal_contribution_reports_progress() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args(["goal", "add", "Emergency Fund", "5000"])
        .assert()
        .success()
        .stdout(contains("Created goal: Emergency Fund"));

    outlay(&dir)
        .args(["goal", "contribute", "Emergency Fund", "250"])
        .assert()
        .success()
        .stdout(contains("Saved: $250.00 of $5000.00 (5%)"));
}

#[test]
fn recurring_apply_is_idempotent_for_the_day() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args([
            "recurring",
            "add",
            "Streaming",
            "9.99",
            "--frequency",
            "monthly",
        ])
        .assert()
        .success();

    outlay(&dir)
        .args(["recurring", "apply", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(contains("Created 1 expenses:"));

    outlay(&dir)
        .args(["recurring", "apply", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(contains("No recurring expenses due."));
}

#[test]
fn dashboard_exports_csv() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args(["expense", "add", "Coffee", "4.50", "--date", "2025-06-10"])
        .assert()
        .success();

    let out_path = dir.path().join("dashboard.csv");
    outlay(&dir)
        .args([
            "dashboard",
            "--date",
            "2025-06-15",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Dashboard exported to:"));

    let csv = std::fs::read_to_string(&out_path).unwrap();
    assert!(csv.starts_with("Section,Name,Date,Amount,Percent"));
    assert!(csv.contains("summary,Current Total,,4.50,"));
}

#[test]
fn import_creates_expenses_and_categories() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    let csv_path = dir.path().join("bank.csv");
    std::fs::write(
        &csv_path,
        "Date,Description,Amount,Category\n\
         2025-06-01,Coffee,4.50,Cafe\n\
         2025-06-02,Bus ticket,2.75,Transport\n",
    )
    .unwrap();

    outlay(&dir)
        .args(["import", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Imported:  2"))
        .stdout(contains("New categories: Cafe"));

    outlay(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("Coffee"))
        .stdout(contains("Bus ticket"))
        .stdout(contains("Showing 2 of 2 expenses · Total: $7.25"));
}

#[test]
fn invalid_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    outlay(&dir).arg("init").assert().success();

    outlay(&dir)
        .args(["expense", "add", "Coffee", "4.50", "--date", "June 10"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

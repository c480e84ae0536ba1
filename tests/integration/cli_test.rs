//! End-to-end tests of the sabersql binary against fake mysql clients.

use super::common::{fake_client, logged_statements, logging_client, DENYING_CLIENT, ECHO_CLIENT};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const MYSQL_ENV: [&str; 5] = [
    "MYSQL_HOST",
    "MYSQL_TCP_PORT",
    "MYSQL_DATABASE",
    "MYSQL_USER",
    "MYSQL_PWD",
];

/// Runs sabersql inside `dir` with an isolated config and environment.
fn run_sabersql(dir: &Path, client: &Path, args: &[&str]) -> (i32, String, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sabersql"));
    command
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--client")
        .arg(client)
        .args(args)
        .env("RUST_LOG", "warn");
    for key in MYSQL_ENV {
        command.env_remove(key);
    }

    let output = command.output().expect("Failed to execute sabersql");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[test]
fn test_exec_prints_client_output() {
    let dir = tempdir().unwrap();
    let client = fake_client(dir.path(), ECHO_CLIENT);

    let (code, stdout, _) = run_sabersql(
        dir.path(),
        &client,
        &["--url", "mysql://loader:pw@db.local/lahman", "exec", "SELECT 1;"],
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "args:-uloader -hdb.local -B lahman\npwd:pw\nSELECT 1;");
}

#[test]
fn test_exec_no_database() {
    let dir = tempdir().unwrap();
    let client = fake_client(dir.path(), ECHO_CLIENT);

    let (code, stdout, _) = run_sabersql(
        dir.path(),
        &client,
        &["-U", "root", "-d", "lahman", "exec", "--no-database", "SHOW DATABASES;"],
    );

    assert_eq!(code, 0);
    assert!(stdout.starts_with("args:-uroot -hlocalhost -B\n"));
}

#[test]
fn test_connection_failure_exits_nonzero() {
    let dir = tempdir().unwrap();
    let client = fake_client(dir.path(), DENYING_CLIENT);

    let (code, stdout, stderr) = run_sabersql(
        dir.path(),
        &client,
        &["-U", "loader", "-d", "lahman", "-H", "db.local", "exec", "SELECT 1;"],
    );

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Connection Error"));
    assert!(stderr.contains("loader@db.local"));
}

#[test]
fn test_create_schema_from_config() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("statements.log");
    let client = logging_client(dir.path(), &log, None);

    std::fs::create_dir(dir.path().join("schema")).unwrap();
    std::fs::write(
        dir.path().join("schema/01_teams.sql"),
        "CREATE TABLE teams (teamID CHAR(3));",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("schema/02_people.sql"),
        "CREATE TABLE people (playerID VARCHAR(9));",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        r#"
[connections.default]
database = "lahman"
user = "root"

[schema]
files = ["schema/01_teams.sql", "schema/02_people.sql"]
"#,
    )
    .unwrap();

    let (code, stdout, stderr) = run_sabersql(dir.path(), &client, &["create-schema"]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "Created database 'lahman' and applied 2 schema files\n"
    );
    assert_eq!(
        logged_statements(&log),
        vec![
            "create database if not exists lahman;",
            "CREATE TABLE teams (teamID CHAR(3));",
            "CREATE TABLE people (playerID VARCHAR(9));",
        ]
    );
}

#[test]
fn test_import_csv() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("statements.log");
    let client = logging_client(dir.path(), &log, None);
    let csv = dir.path().join("People.csv");
    std::fs::write(
        &csv,
        "playerID,nameFirst,weight\naaronha01,Hank,180\nonealpa01,Paul,\n\"smith,jo01\",Jo O'Neil,175\n",
    )
    .unwrap();
    let csv = csv.to_string_lossy().to_string();

    let (code, stdout, stderr) = run_sabersql(
        dir.path(),
        &client,
        &["-U", "root", "-d", "lahman", "import", "-t", "people", "-b", "2", &csv],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "Imported 3 rows into 'people' in 2 batches\n");
    assert_eq!(
        logged_statements(&log),
        vec![
            "INSERT INTO people (playerID,nameFirst,weight) VALUES ('aaronha01','Hank',180),('onealpa01','Paul',NULL);",
            "INSERT INTO people (playerID,nameFirst,weight) VALUES ('smith,jo01','Jo O''Neil',175);",
        ]
    );
}

#[test]
fn test_import_malformed_csv_fails() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("statements.log");
    let client = logging_client(dir.path(), &log, None);
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "id,name\n1,a\n2\n3,c\n").unwrap();
    let csv = csv.to_string_lossy().to_string();

    let (code, _, stderr) = run_sabersql(
        dir.path(),
        &client,
        &["-U", "root", "-d", "lahman", "import", "-t", "t", &csv],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("line 3"));
    // Rows read before the bad line were still sent.
    assert_eq!(
        logged_statements(&log),
        vec!["INSERT INTO t (id,name) VALUES (1,'a');"]
    );
}

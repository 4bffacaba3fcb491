// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use tally::cli::Shell;
use tally::{Amount, Ledger, UserSummary};

/// Test fixture: alice (100) and bob (50), nobody logged in
pub fn alice_and_bob() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    ledger.register("alice", "pw", 100)?;
    ledger.register("bob", "pw", 50)?;
    Ok(ledger)
}

/// Balance of a registered user
pub fn balance(ledger: &Ledger, name: &str) -> Amount {
    ledger.user(name).map(|u| u.balance).unwrap_or_default()
}

/// Sum of every user's balance
pub fn total_balance(ledger: &Ledger) -> i128 {
    ledger.check_integrity().total_balance
}

/// `list_other_users` sorted by name, since the ledger gives no order
pub fn sorted_others(ledger: &Ledger, exclude: &str) -> Vec<UserSummary> {
    let mut others = ledger.list_other_users(exclude);
    others.sort_by(|a, b| a.name.cmp(&b.name));
    others
}

/// Feed `script` lines to a fresh shell and return the ledger and everything printed
pub fn run_script(ledger: Ledger, script: &[&str]) -> Result<(Ledger, String)> {
    let mut input = script.join("\n");
    input.push('\n');
    run_bytes(ledger, input.as_bytes())
}

/// Feed raw bytes to a fresh shell, for input that is not valid UTF-8
pub fn run_bytes(ledger: Ledger, input: &[u8]) -> Result<(Ledger, String)> {
    let mut output = Vec::new();
    let mut shell = Shell::new(ledger, Cursor::new(input), &mut output);
    shell.run()?;
    let ledger = shell.into_ledger();

    Ok((ledger, String::from_utf8(output)?))
}

//! `actions` subcommands: inspect and edit the emoji-to-action table.

use anyhow::{Result, bail};
use colored::Colorize;
use comfy_table::{Cell, Table};
use std::collections::HashSet;

use quickact_core::{ActionKind, ActionTable};

use super::Db;

pub fn list(db: &Db) -> Result<()> {
    let overrides = db.overrides.list_raw()?;
    let overridden: HashSet<&str> = overrides.iter().map(|(e, _)| e.as_str()).collect();
    let effective =
        ActionTable::with_overrides(overrides.iter().map(|(e, a)| (e.as_str(), a.as_str())));

    let mut rows: Vec<_> = effective.iter().collect();
    rows.sort_by_key(|(_, kind)| kind.as_str());

    let mut table = Table::new();
    table.set_header(vec!["Emoji", "Action", "Source"]);
    for (emoji, kind) in rows {
        let source = if overridden.contains(emoji.as_str()) {
            "override"
        } else {
            "default"
        };
        table.add_row(vec![
            Cell::new(emoji),
            Cell::new(kind),
            Cell::new(source),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn set(db: &Db, emoji: &str, action: &str) -> Result<()> {
    if ActionKind::parse(action).is_none() {
        let valid: Vec<&str> = ActionKind::ALL.iter().map(|k| k.as_str()).collect();
        bail!(
            "unknown action {:?}; valid actions: {}",
            action,
            valid.join(", ")
        );
    }

    db.overrides.set(emoji, action)?;
    println!("{}", format!("Mapped {emoji} to {action}.").green());
    Ok(())
}

pub fn unset(db: &Db, emoji: &str) -> Result<()> {
    if db.overrides.unset(emoji)? {
        println!("{}", format!("Removed override for {emoji}.").green());
    } else {
        println!("{}", format!("No override for {emoji}.").yellow());
    }
    Ok(())
}

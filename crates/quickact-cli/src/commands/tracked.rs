//! `list`, `show`, and `disarm` over the tracked message table.

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Table};

use quickact_core::store::RecordStore;

use super::Db;

pub fn list(db: &Db) -> Result<()> {
    let mut records = db.records.load_all()?;
    if records.is_empty() {
        println!("No tracked messages.");
        return Ok(());
    }
    records.sort_by_key(|r| r.created_at);

    let mut table = Table::new();
    table.set_header(vec![
        "Message ID",
        "Channel",
        "Community",
        "Type",
        "Reactions",
        "Created",
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.message_id),
            Cell::new(record.channel_id),
            Cell::new(record.guild_id),
            Cell::new(record.action_type),
            Cell::new(record.allowed_reactions.join(" ")),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn show(db: &Db, message_id: u64) -> Result<()> {
    let Some(record) = db.records.get(message_id)? else {
        println!("{}", format!("Message {message_id} is not tracked.").yellow());
        return Ok(());
    };

    println!("Message ID:  {}", record.message_id);
    println!("Channel:     {}", record.channel_id);
    println!("Community:   {}", record.guild_id);
    println!("Author:      {}", record.author_id);
    println!("Type:        {}", record.action_type);
    println!("Reactions:   {}", record.allowed_reactions.join(" "));
    println!("Created:     {}", record.created_at.to_rfc3339());
    if !record.data.is_empty() {
        println!("\nData:\n{}", serde_json::to_string_pretty(&record.data)?);
    }
    Ok(())
}

pub fn disarm(db: &Db, message_id: u64) -> Result<()> {
    if db.records.delete(message_id)? {
        println!("{}", format!("Disarmed message {message_id}.").green());
    } else {
        println!("{}", format!("Message {message_id} is not tracked.").yellow());
    }
    Ok(())
}

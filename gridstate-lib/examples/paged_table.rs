//! Lazy paged table served by an in-process data source.
//!
//! Run with: cargo run --example paged_table
//!
//! Debug logs are written to paged_table.log.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use gridstate_lib::filter::MatchMode;
use gridstate_lib::model::{Column, FieldPath, Record, RowRef};
use gridstate_lib::page::LazyLoadRequest;
use gridstate_lib::selection::{Identity, Modifiers, SelectionMode};
use gridstate_lib::sort::sort_records;
use gridstate_lib::{TableConfig, TableController, TableEvent};
use simplelog::{Config, LevelFilter, WriteLogger};

const CITIES: [&str; 5] = ["Lisbon", "Oslo", "Lima", "Osaka", "Leeds"];

/// Backend holding the full data set.
struct Source {
    rows: Vec<RowRef>,
}

impl Source {
    fn new(count: i64) -> Self {
        let rows = (1..=count)
            .map(|id| {
                let city = CITIES[(id as usize * 7) % CITIES.len()];
                Arc::new(
                    Record::new()
                        .set("id", id)
                        .set("name", format!("customer {id:03}"))
                        .set("city", city),
                )
            })
            .collect();
        Self { rows }
    }

    fn serve(&self, request: &LazyLoadRequest) -> (Vec<RowRef>, usize) {
        let filtered = gridstate_lib::filter::evaluate(
            &self.rows,
            &request.filters,
            &[FieldPath::from("name"), FieldPath::from("city")],
            &Default::default(),
        )
        .ok()
        .flatten()
        .unwrap_or_else(|| self.rows.clone());
        let sorted = sort_records(&filtered, &request.sort);
        let total = sorted.len();
        let page = sorted.into_iter().skip(request.offset).take(request.length).collect();
        (page, total)
    }
}

fn pump(table: &mut TableController, source: &Source) -> Result<(), Box<dyn std::error::Error>> {
    for event in table.take_events() {
        log::debug!("event: {}", event.name());
        if let TableEvent::LazyLoad(request) = event {
            let (page, total) = source.serve(&request);
            table.set_total_records(total);
            table.set_records(page)?;
        }
    }
    Ok(())
}

fn print_page(table: &TableController) {
    let window = table.page_window();
    println!(
        "page {}/{} ({} rows)",
        window.page() + 1,
        window.page_count(),
        table.total_records()
    );
    for row in table.visible_records() {
        let marker = if table.is_selected(row) { "*" } else { " " };
        println!(
            " {} {:>3}  {:<14} {}",
            marker,
            row.get_int("id").ok().flatten().unwrap_or_default(),
            row.get_string("name").ok().flatten().unwrap_or_default(),
            row.get_string("city").ok().flatten().unwrap_or_default()
        );
    }
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(log_file) = File::create("paged_table.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let source = Source::new(42);
    let config = TableConfig::default()
        .with_lazy()
        .with_paginator(8)
        .with_selection(SelectionMode::Multiple, Identity::key("id"))
        .with_filter_delay(Duration::from_millis(250))
        .with_state("paged_table", "session");
    let columns = vec![
        Column::new("id", "Id"),
        Column::new("name", "Name"),
        Column::new("city", "City"),
    ];

    let mut table = TableController::new(config, columns);
    table.init()?;
    pump(&mut table, &source)?;
    print_page(&table);

    println!("sort by city, then page 2");
    table.sort_by("city", false)?;
    pump(&mut table, &source)?;
    table.go_to_page(1)?;
    pump(&mut table, &source)?;
    print_page(&table);

    println!("type 'o', then 'os' into the city filter");
    table.filter("city", "o", MatchMode::StartsWith)?;
    table.filter("city", "os", MatchMode::StartsWith)?;
    table.settle_filter().await?;
    pump(&mut table, &source)?;
    print_page(&table);

    println!("select the first three rows");
    table.click_row(0, Modifiers::NONE)?;
    table.click_row(2, Modifiers::shift())?;
    pump(&mut table, &source)?;
    print_page(&table);

    if let Some(snapshot) = table.save_state()? {
        println!("saved state: {}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}

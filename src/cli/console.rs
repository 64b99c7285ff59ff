use anyhow::{Context, Result};
use listing_viewer::{DerivedView, FilterField, ListingSource, PageSize, Record, Viewer};
use std::fmt::Write as _;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::args::parse_page_size;

pub const HELP: &str = "\
Commands:
  search [text]          fetch listings matching text (empty: all)
  filter <field> <text>  filter by name, description, price, country, city or address
  clear <field>          remove one filter
  first | prev | next | last | page <n>
  size <5|10|16|25|50>   rows per page
  show <id>              open the detail view
  close                  close the detail view
  reload                 fetch again
  help | quit";

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Filter(FilterField, String),
    Clear(FilterField),
    First,
    Previous,
    Next,
    Last,
    Page(usize),
    Size(PageSize),
    Show(String),
    Close,
    Reload,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "filter" | "f" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::Filter(field.parse()?, value.trim().to_string())
        }
        "clear" => Command::Clear(rest.parse()?),
        "first" => Command::First,
        "prev" | "previous" => Command::Previous,
        "next" | "n" => Command::Next,
        "last" => Command::Last,
        "page" => Command::Page(
            rest.parse()
                .map_err(|_| format!("{rest:?} is not a page number"))?,
        ),
        "size" => Command::Size(parse_page_size(rest)?),
        "show" if !rest.is_empty() => Command::Show(rest.to_string()),
        "close" => Command::Close,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(format!("unknown command {line:?}, try `help`")),
    };
    Ok(command)
}

/// Apply a command to the viewer; returns a note for the user when the
/// command had no effect.
pub async fn execute<S: ListingSource>(viewer: &mut Viewer<S>, command: Command) -> Option<String> {
    debug!("Executing {:?}", command);
    match command {
        Command::Search(text) => {
            viewer.set_main_query(text);
            viewer.submit_query().await;
        }
        Command::Filter(field, value) => viewer.set_filter(field, value),
        Command::Clear(field) => viewer.set_filter(field, ""),
        Command::First => return moved(viewer.first_page()),
        Command::Previous => return moved(viewer.previous_page()),
        Command::Next => return moved(viewer.next_page()),
        Command::Last => return moved(viewer.last_page()),
        Command::Page(page) => {
            if !viewer.go_to_page(page) {
                return Some(format!("Page {page} is out of range"));
            }
        }
        Command::Size(size) => viewer.set_page_size(size),
        Command::Show(id) => {
            if !viewer.select_by_id(&id) {
                return Some(format!("No listing with id {id}"));
            }
        }
        Command::Close => viewer.deselect(),
        Command::Reload => {
            viewer.reload().await;
        }
        Command::Help => return Some(HELP.to_string()),
        Command::Quit => {}
    }
    None
}

fn moved(changed: bool) -> Option<String> {
    (!changed).then(|| "Already there".to_string())
}

/// Read commands from stdin until `quit` or end of input
pub async fn run_interactive<S: ListingSource>(viewer: &mut Viewer<S>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");
    prompt()?;

    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Some(note) = execute(viewer, command).await {
                    println!("{note}");
                }
                print!("{}", render(viewer));
            }
            Err(msg) => println!("{msg}"),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

/// Full screen: status or page window, then the detail view if open
pub fn render<S: ListingSource>(viewer: &Viewer<S>) -> String {
    let loader = viewer.loader();
    let mut out = render_page(&viewer.current_view(), loader.loading(), loader.error());
    if let Some(record) = viewer.view().selected() {
        out.push('\n');
        out.push_str(&render_detail(record));
    }
    out
}

pub fn render_page(view: &DerivedView<'_>, loading: bool, error: Option<&str>) -> String {
    if loading {
        return "Loading listings...\n".to_string();
    }
    if let Some(error) = error {
        return format!("Error loading listings: {error}\n");
    }

    let mut out = String::new();
    for (i, record) in view.items.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, record.id, record.name());
        let _ = writeln!(out, "   Price: {}", record.price_label());
        if !record.description().is_empty() {
            let _ = writeln!(out, "   {}", record.description());
        }
        let _ = writeln!(out, "   Location: {}, {}", record.city(), record.country());
        let _ = writeln!(out, "   Address: {}", record.address());
    }

    let meta = &view.meta;
    let _ = writeln!(
        out,
        "Rows per page: {} | {} | Page {} of {} {}{}{}{}",
        meta.page_size,
        meta,
        meta.current_page,
        meta.total_pages,
        if meta.has_previous() { "<<" } else { "--" },
        if meta.has_previous() { " <" } else { " -" },
        if meta.has_next() { " >" } else { " -" },
        if meta.has_next() { " >>" } else { " --" },
    );
    out
}

pub fn render_detail(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", record.name());
    if !record.image().is_empty() {
        let _ = writeln!(out, "Image: {}", record.image());
    }
    let _ = writeln!(out, "Price: {}", record.price_label());
    let _ = writeln!(out, "Description: {}", record.description());
    let _ = writeln!(out, "Location:");
    let _ = writeln!(out, "  City: {}", record.city());
    let _ = writeln!(out, "  Country: {}", record.country());
    let _ = writeln!(out, "  Address: {}", record.address());
    let _ = writeln!(out, "Features:");
    if record.features.is_empty() {
        let _ = writeln!(out, "  No features available.");
    } else {
        for feature in &record.features {
            let _ = writeln!(out, "  - {}", feature);
        }
    }
    out
}

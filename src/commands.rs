use std::fmt;
use std::i64;
use std::num::{IntErrorKind, ParseIntError};

use clap::ArgMatches;

use prettytable::{Cell, Row, Table};

use time::{at, strftime, Timespec};

use data::{check_timestamp, Book, Books};
use errors::*;

const DATE_FMT: &'static str = "%a, %d %b %Y %T";
const STAR: &'static str = "★";

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    List,
    Add { title: String, author: String },
    Edit {
        index: i64,
        title: String,
        author: String,
    },
    Read(i64),
    Rate(i64, i64),
    Delete(i64),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Command::List => write!(f, "List books"),
            Command::Add { ref title, ref author } => {
                write!(f, "Add '{}' by '{}'", title, author)
            }
            Command::Edit { index, ref title, ref author } => {
                write!(f, "Edit book #{} (title '{}', author '{}')", index, title, author)
            }
            Command::Read(index) => write!(f, "Toggle read for book #{}", index),
            Command::Rate(index, rating) => write!(f, "Rate book #{} {} stars", index, rating),
            Command::Delete(index) => write!(f, "Delete book #{}", index),
        }
    }
}

impl Command {
    /// Normalizes either argument surface into one command. Flags are checked
    /// before subcommands; no command at all means `List`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Command> {
        if matches.is_present("flag-list") {
            return Ok(Command::List);
        }
        if let Some(arg) = matches.value_of("flag-add") {
            return parse_add(arg);
        }
        if let Some(arg) = matches.value_of("flag-edit") {
            return parse_edit(arg);
        }
        if let Some(arg) = matches.value_of("flag-read") {
            return Ok(Command::Read(parse_index(arg, "read")?));
        }
        if let Some(arg) = matches.value_of("flag-rate") {
            return parse_rate(arg);
        }
        if let Some(arg) = matches.value_of("flag-del") {
            return Ok(Command::Delete(parse_index(arg, "del")?));
        }

        match matches.subcommand() {
            ("add", Some(sub)) => parse_add(required(sub, "BOOK")?),
            ("edit", Some(sub)) => parse_edit(required(sub, "CHANGE")?),
            ("read", Some(sub)) => {
                Ok(Command::Read(parse_index(required(sub, "INDEX")?, "read")?))
            }
            ("rate", Some(sub)) => parse_rate(required(sub, "RATING")?),
            ("del", Some(sub)) => {
                Ok(Command::Delete(parse_index(required(sub, "INDEX")?, "del")?))
            }
            _ => Ok(Command::List),
        }
    }

    /// Whether running this command changes the book list.
    pub fn mutates(&self) -> bool {
        match *self {
            Command::List => false,
            _ => true,
        }
    }
}

fn required<'m>(matches: &'m ArgMatches, name: &str) -> Result<&'m str> {
    matches.value_of(name)
        .ok_or_else(|| ErrorKind::MalformedCommand(format!("missing `{}`", name)).into())
}

fn parse_add(arg: &str) -> Result<Command> {
    let parts: Vec<&str> = arg.splitn(2, ':').collect();
    if parts.len() != 2 {
        bail!(ErrorKind::MalformedCommand("use 'Title:Author' for add".into()));
    }

    Ok(Command::Add {
        title: parts[0].to_owned(),
        author: parts[1].to_owned(),
    })
}

fn parse_edit(arg: &str) -> Result<Command> {
    let parts: Vec<&str> = arg.splitn(3, ':').collect();
    if parts.len() != 3 {
        bail!(ErrorKind::MalformedCommand("use 'index:Title:Author' for edit".into()));
    }

    Ok(Command::Edit {
        index: parse_index(parts[0], "edit")?,
        title: parts[1].to_owned(),
        author: parts[2].to_owned(),
    })
}

fn parse_rate(arg: &str) -> Result<Command> {
    let parts: Vec<&str> = arg.splitn(2, ':').collect();
    if parts.len() != 2 {
        bail!(ErrorKind::MalformedCommand("use 'index:rating(1-5)' for rate".into()));
    }

    let index = parse_index(parts[0], "rate")?;
    let rating = parse_integer(parts[1])
        .chain_err(|| {
            ErrorKind::MalformedCommand(format!("invalid rating value `{}`", parts[1]))
        })?;

    Ok(Command::Rate(index, rating))
}

/// Negative or oversized indices parse fine; the store rejects them.
fn parse_index(arg: &str, command: &str) -> Result<i64> {
    parse_integer(arg)
        .chain_err(|| ErrorKind::MalformedCommand(format!("invalid index `{}` for {}", arg, command)))
}

// Integers past the i64 range saturate so they are still reported as out of
// range instead of as bad syntax.
fn parse_integer(arg: &str) -> ::std::result::Result<i64, ParseIntError> {
    match arg.parse::<i64>() {
        Err(ref e) if *e.kind() == IntErrorKind::PosOverflow => Ok(i64::MAX),
        Err(ref e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
        parsed => parsed,
    }
}

/// Runs one command against the book list and returns the message to show.
pub fn exec_command(books: &mut Books, command: Command) -> Result<String> {
    info!("{}", command);

    match command {
        Command::List => do_list(books),
        Command::Add { ref title, ref author } => do_add(books, title, author),
        Command::Edit { index, ref title, ref author } => do_edit(books, index, title, author),
        Command::Read(index) => do_read(books, index),
        Command::Rate(index, rating) => do_rate(books, index, rating),
        Command::Delete(index) => do_delete(books, index),
    }
}

fn do_list(books: &Books) -> Result<String> {
    build_table(books)?.printstd();

    if books.is_empty() {
        Ok("No books yet".into())
    } else {
        Ok(format!("{} book(s)", books.len()))
    }
}

fn do_add(books: &mut Books, title: &str, author: &str) -> Result<String> {
    let book = books.add(title, author);

    Ok(format!("Added '{}' by {}", book.title, book.author))
}

fn do_edit(books: &mut Books, index: i64, title: &str, author: &str) -> Result<String> {
    let book = books.edit(index, title, author)?;

    Ok(format!("Book {} is now '{}' by {}", index, book.title, book.author))
}

fn do_read(books: &mut Books, index: i64) -> Result<String> {
    let book = books.toggle_read(index)?;

    if book.read {
        Ok(format!("Book {} marked as read", index))
    } else {
        Ok(format!("Book {} marked as unread", index))
    }
}

fn do_rate(books: &mut Books, index: i64, rating: i64) -> Result<String> {
    let book = books.rate(index, rating)?;

    Ok(format!("Book {} rated {} stars", index, book.rating))
}

fn do_delete(books: &mut Books, index: i64) -> Result<String> {
    let book = books.delete(index)?;

    Ok(format!("Deleted '{}' by {}", book.title, book.author))
}

fn format_time(ts: Timespec) -> Result<String> {
    // `at` panics on stamps the C library cannot convert.
    check_timestamp(ts)?;

    Ok(strftime(DATE_FMT, &at(ts))?)
}

fn build_table(books: &Books) -> Result<Table> {
    let mut table = Table::new();
    table.set_titles(row!["#", "Title", "Author", "Status", "Added At", "Finished At", "Rating"]);

    for (index, book) in books.iter().enumerate() {
        table.add_row(book_row(index, book)?);
    }

    Ok(table)
}

fn book_row(index: usize, book: &Book) -> Result<Row> {
    let mut row = row![index.to_string(),
                       book.title,
                       book.author,
                       book.status(),
                       format_time(book.added_at)?];

    if let Some(finished) = book.finished_at {
        row.add_cell(Cell::new(&format_time(finished)?));
    } else {
        row.add_cell(cell!());
    }

    row.add_cell(Cell::new(&STAR.repeat(book.rating as usize)));

    Ok(row)
}

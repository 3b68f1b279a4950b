use clap::{App, AppSettings, Arg, ArgGroup, SubCommand};

use config::NAME;

pub fn build_app<'a, 'b>() -> App<'a, 'b> {
    App::new(NAME)
        .about("BookTracker - track your reading journey")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::VersionlessSubcommands)
        .arg(Arg::with_name("file")
                 .long("file")
                 .short("f")
                 .takes_value(true)
                 .value_name("PATH")
                 .env("TOME_FILE")
                 .global(true)
                 .help("Book list to use (defaults to the XDG data directory)"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .global(true)
                 .help("Log more (repeat for more detail)"))
        // Flag-style surface, kept alongside the subcommands below.
        .arg(Arg::with_name("flag-list")
                 .long("list")
                 .help("List all books"))
        .arg(Arg::with_name("flag-add")
                 .long("add")
                 .takes_value(true)
                 .value_name("TITLE:AUTHOR")
                 .help("Add a new book"))
        .arg(Arg::with_name("flag-edit")
                 .allow_hyphen_values(true)
                 .long("edit")
                 .takes_value(true)
                 .value_name("INDEX:TITLE:AUTHOR")
                 .help("Edit a book by index (either TITLE or AUTHOR can be empty)"))
        .arg(Arg::with_name("flag-read")
                 .allow_hyphen_values(true)
                 .long("read")
                 .takes_value(true)
                 .value_name("INDEX")
                 .help("Mark a book as read/unread by index"))
        .arg(Arg::with_name("flag-rate")
                 .allow_hyphen_values(true)
                 .long("rate")
                 .takes_value(true)
                 .value_name("INDEX:RATING")
                 .help("Rate a book from 1 to 5"))
        .arg(Arg::with_name("flag-del")
                 .allow_hyphen_values(true)
                 .long("del")
                 .takes_value(true)
                 .value_name("INDEX")
                 .help("Delete a book by index"))
        .group(ArgGroup::with_name("legacy")
                   .args(&["flag-list", "flag-add", "flag-edit", "flag-read", "flag-rate",
                           "flag-del"]))
        .subcommand(SubCommand::with_name("list").about("List all books"))
        .subcommand(SubCommand::with_name("add")
                        .about("Add a new book")
                        .arg(Arg::with_name("BOOK")
                                 .required(true)
                                 .index(1)
                                 .help("Format: 'Title:Author'")))
        .subcommand(SubCommand::with_name("edit")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .about("Edit a book's title and/or author")
                        .arg(Arg::with_name("CHANGE")
                                 .required(true)
                                 .index(1)
                                 .help("Format: 'index:Title:Author' (leave a part empty to \
                                        keep it)")))
        .subcommand(SubCommand::with_name("read")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .about("Toggle a book between read and unread")
                        .arg(Arg::with_name("INDEX")
                                 .required(true)
                                 .index(1)
                                 .help("Index of the book (see `list`)")))
        .subcommand(SubCommand::with_name("rate")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .about("Rate a book")
                        .arg(Arg::with_name("RATING")
                                 .required(true)
                                 .index(1)
                                 .help("Format: 'index:rating' with rating from 1 to 5")))
        .subcommand(SubCommand::with_name("del")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .about("Delete a book")
                        .arg(Arg::with_name("INDEX")
                                 .required(true)
                                 .index(1)
                                 .help("Index of the book (see `list`)")))
}

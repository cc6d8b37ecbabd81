use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelf::types::id::Id;

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .help(help)
        .required(true)
        .value_parser(value_parser!(i64))
}

fn form_args(command: Command) -> Command {
    command
        .arg(Arg::new("title").long("title").help("Title of the book"))
        .arg(
            Arg::new("author-id")
                .long("author-id")
                .help("Id of the author")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("genre-id")
                .long("genre-id")
                .help("Id of a genre, can be given more than once")
                .action(ArgAction::Append)
                .value_parser(value_parser!(i64)),
        )
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .help("Don't ask for confirmation")
        .action(ArgAction::SetTrue)
}

pub fn arg_parser() -> Command {
    Command::new("shelf")
        .about("Book catalog client")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("books")
                .about("List, show, create, edit and delete books")
                .subcommand(Command::new("list").about("List all books"))
                .subcommand(
                    Command::new("show")
                        .about("Show a book and its comments")
                        .arg(id_arg("Id of the book")),
                )
                .subcommand(form_args(Command::new("new").about("Create a book")))
                .subcommand(form_args(
                    Command::new("edit")
                        .about("Edit a book")
                        .arg(id_arg("Id of the book")),
                ))
                .subcommand(form_args(
                    Command::new("patch")
                        .about("Change some fields of a book")
                        .arg(id_arg("Id of the book")),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a book")
                        .arg(id_arg("Id of the book"))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(Command::new("authors").about("List all authors"))
        .subcommand(Command::new("genres").about("List all genres"))
        .subcommand(
            Command::new("open")
                .about("Open a page by its path, e.g. /books/3/edit")
                .arg(Arg::new("path").required(true))
                .arg(yes_arg()),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser().subcommand(Command::new("repl").about("Launch a read eval print loop"))
}

pub fn arg_parser_repl() -> Command {
    arg_parser().subcommand(Command::new("exit").about("Leave the repl"))
}

pub fn get_id(matches: &ArgMatches) -> Id {
    Id(matches.get_one::<i64>("id").copied().unwrap_or_default())
}

pub fn get_yes(matches: &ArgMatches) -> bool {
    matches.get_flag("yes")
}

/// Form fields given on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormArgs {
    pub title:     Option<String>,
    pub author_id: Option<Id>,
    pub genre_ids: Option<Vec<Id>>,
}

impl FormArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            title:     matches.get_one::<String>("title").cloned(),
            author_id: matches.get_one::<i64>("author-id").copied().map(Id),
            genre_ids: matches
                .get_many::<i64>("genre-id")
                .map(|ids| ids.copied().map(Id).collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author_id.is_none() && self.genre_ids.is_none()
    }
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!(
            "{parent_fn_name} {cmd_name}",
            parent_fn_name = parent_fn_name,
            cmd_name = cmd.get_name()
        )
        .trim()
        .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}

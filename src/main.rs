use structopt::StructOpt;
use zasm::cli::command;

fn main() {
    command::terminal_init();
    command::root(command::CommandRoot::from_args());
}

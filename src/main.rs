use anyhow::Context;
use std::io;
use std::path::PathBuf;

mod data;
mod ledger;
mod menu;
mod persist;
mod read;
mod validate;
mod write;

/// Environment variable naming the persisted ledger file. Only this layer
/// reads the environment; the core takes the path as a parameter.
const ACCT_LIST_VAR: &str = "ACCT_LIST";

enum Mode {
    Info,
    History,
    Add,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let mode = match args.get(1).map(String::as_str) {
        Some("-i") => Mode::Info,
        Some("-h") => Mode::History,
        Some("-t") => Mode::Add,
        Some("-?") => {
            print_help();
            return Ok(());
        }
        Some(other) => {
            println!("Invalid argument {other:?}. Please enter a valid choice (-i, -h, -t, or -?).");
            return Ok(());
        }
        None => {
            println!("No options supplied. Please supply -i, -h, or -t after entering the accounts utility.");
            println!("For more information about the options, enter the accounts utility with the -? option.");
            return Ok(());
        }
    };

    let path: PathBuf = std::env::var(ACCT_LIST_VAR)
        .with_context(|| format!("{ACCT_LIST_VAR} must name the ledger file"))?
        .into();
    let mut account_table = read::load(&path)?;

    let today = chrono::Local::now().format("%y-%m-%d").to_string();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    match mode {
        Mode::Info => menu::info_loop(&account_table, &mut input, &mut out)?,
        Mode::History => menu::history_loop(&account_table, &mut input, &mut out)?,
        Mode::Add => menu::add_loop(&mut account_table, &today, &mut input, &mut out)?,
    }

    // Quit from any mode flushes the table back, the whole file at once.
    persist::save(&account_table, &path)?;
    Ok(())
}

fn print_help() {
    println!("The accounts utility shows account information or history, and can record");
    println!("a transaction against an existing or a new account.");
    println!("  -i   view account information; pick an account by its menu number");
    println!("  -h   view account history; pick an account by its menu number");
    println!("  -t   add a transaction; pick an account, or type 'n' for a new one");
    println!("  -?   show this help");
    println!("Typing q at any prompt saves the ledger and exits.");
    println!("The ledger file location is read from the {ACCT_LIST_VAR} environment variable.");
}

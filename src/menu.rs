use crate::data::{AccountNumber, Transaction, TxKind};
use crate::ledger::Ledger;
use crate::validate;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

/// What came back from a prompt. `q`/`Q` quits from *any* prompt in any
/// mode, and so does end-of-input, so a closed stdin can't wedge a loop.
enum Input {
    Quit,
    Line(String),
}

/// One menu selection in the account list.
enum Choice {
    Quit,
    New,
    Existing(AccountNumber),
}

fn read_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Input> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim().to_string();
    if line == "q" || line == "Q" {
        return Ok(Input::Quit);
    }
    Ok(Input::Line(line))
}

/// Prints the numbered account roster under a title and returns the numbers
/// in display order, so a menu choice indexes straight into the result.
fn print_menu<W: Write>(out: &mut W, ledger: &Ledger, title: &str) -> io::Result<Vec<AccountNumber>> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.len()))?;
    let numbers = ledger.sorted_for_display();
    for (i, number) in numbers.iter().enumerate() {
        let name = ledger.holder_name(number).unwrap_or_default();
        writeln!(out, "{}) {} {}", i + 1, name, number)?;
    }
    Ok(numbers)
}

fn pick<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    numbers: &[AccountNumber],
    allow_new: bool,
) -> io::Result<Choice> {
    loop {
        match read_input(input, out, "Enter choice => ")? {
            Input::Quit => return Ok(Choice::Quit),
            Input::Line(line) => {
                if allow_new && (line == "n" || line == "N") {
                    return Ok(Choice::New);
                }
                match validate::menu_choice(&line, numbers.len()) {
                    Ok(i) => return Ok(Choice::Existing(numbers[i].clone())),
                    Err(e) => {
                        log::warn!("rejected menu choice {line:?}: {e}");
                        writeln!(out, "{e}. Please choose a valid one from the list.")?;
                    }
                }
            }
        }
    }
}

/// The `-i` loop: pick an account, show its summary, offer to go around.
pub(crate) fn info_loop<R: BufRead, W: Write>(
    ledger: &Ledger,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        let numbers = print_menu(out, ledger, "Info")?;
        writeln!(out, "q)uit")?;
        let number = match pick(input, out, &numbers, false)? {
            Choice::Existing(n) => n,
            _ => return Ok(()),
        };
        writeln!(out, "     account #:  {number}")?;
        writeln!(
            out,
            "          name:  {}",
            ledger.holder_name(&number).unwrap_or_default()
        )?;
        writeln!(out, "       balance:  ${}", ledger.balance_display(&number))?;
        match read_input(
            input,
            out,
            "Return to the list of account holders? (y)es or (q)uit  ",
        )? {
            Input::Quit => return Ok(()),
            Input::Line(_) => {}
        }
    }
}

/// The `-h` loop: pick an account, print its transactions in date order.
pub(crate) fn history_loop<R: BufRead, W: Write>(
    ledger: &Ledger,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        let numbers = print_menu(out, ledger, "History")?;
        writeln!(out, "q)uit")?;
        let number = match pick(input, out, &numbers, false)? {
            Choice::Existing(n) => n,
            _ => return Ok(()),
        };
        for tx in ledger.history(&number) {
            writeln!(out, "     {} {} ${}", tx.date, tx.kind.label(), tx.amount)?;
        }
    }
}

/// The `-t` loop: pick an existing account or open a new one, then prompt
/// for type and amount until both validate, and commit the transaction. The
/// date stamped on the transaction is supplied by the caller as `YY-MM-DD`
/// text; the core never looks at a clock.
pub(crate) fn add_loop<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    today: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        let numbers = print_menu(out, ledger, "Add Transaction")?;
        writeln!(out, "n)ew account")?;
        writeln!(out, "q)uit")?;
        match pick(input, out, &numbers, true)? {
            Choice::Quit => return Ok(()),
            Choice::New => {
                let Some(number) = prompt_new_account_number(ledger, input, out)? else {
                    return Ok(());
                };
                let Some(name) = prompt_holder_name(input, out)? else {
                    return Ok(());
                };
                let Some(kind) = prompt_kind(input, out)? else {
                    return Ok(());
                };
                let Some(amount) = prompt_amount(input, out)? else {
                    return Ok(());
                };
                let tx = Transaction {
                    name,
                    date: today.to_string(),
                    kind,
                    amount,
                };
                // The number was vetted at the prompt; surface anything that
                // slips through instead of dropping money silently.
                if let Err(e) = ledger.create_account(&number, tx) {
                    writeln!(out, "{e}")?;
                }
            }
            Choice::Existing(number) => {
                let Some(kind) = prompt_kind(input, out)? else {
                    return Ok(());
                };
                let Some(amount) = prompt_amount(input, out)? else {
                    return Ok(());
                };
                let name = ledger.holder_name(&number).unwrap_or_default().to_string();
                let tx = Transaction {
                    name,
                    date: today.to_string(),
                    kind,
                    amount,
                };
                if let Err(e) = ledger.append(&number, tx) {
                    writeln!(out, "{e}")?;
                }
            }
        }
    }
}

fn prompt_new_account_number<R: BufRead, W: Write>(
    ledger: &Ledger,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<AccountNumber>> {
    let mut prompt = "Enter a new 4-character account number  ";
    loop {
        match read_input(input, out, prompt)? {
            Input::Quit => return Ok(None),
            Input::Line(number) => {
                if validate::account_number_ok(&number)
                    && validate::account_is_new(&number, ledger)
                {
                    return Ok(Some(number));
                }
                log::warn!("rejected new account number {number:?}");
                prompt = "This account already exists or has an invalid length. \
                          Please enter a new 4-character account number  ";
            }
        }
    }
}

fn prompt_holder_name<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<String>> {
    loop {
        match read_input(input, out, "Please enter a name for the account holder  ")? {
            Input::Quit => return Ok(None),
            Input::Line(name) => match validate::check_holder_name(&name) {
                Ok(()) => return Ok(Some(name)),
                Err(e) => writeln!(out, "{e}")?,
            },
        }
    }
}

fn prompt_kind<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<TxKind>> {
    let mut prompt = "Enter the type of transaction (W - withdrawal, D - deposit)  ";
    loop {
        match read_input(input, out, prompt)? {
            Input::Quit => return Ok(None),
            Input::Line(line) => match validate::parse_kind(&line) {
                Ok(kind) => return Ok(Some(kind)),
                Err(_) => {
                    prompt = "Invalid transaction type. \
                              Please enter a W for withdrawal or D for deposit  ";
                }
            },
        }
    }
}

fn prompt_amount<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Decimal>> {
    loop {
        match read_input(input, out, "Please enter the amount (without the dollar sign!)  ")? {
            Input::Quit => return Ok(None),
            Input::Line(line) => match validate::parse_amount(&line) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => writeln!(out, "{e}")?,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(name: &str, date: &str, kind: TxKind, amount: Decimal) -> Transaction {
        Transaction {
            name: name.to_string(),
            date: date.to_string(),
            kind,
            amount,
        }
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .create_account("1234", tx("Zoe Hart", "19-01-01", TxKind::Deposit, dec!(100.00)))
            .unwrap();
        ledger
            .create_account("0042", tx("Abe Ford", "19-01-02", TxKind::Deposit, dec!(5.50)))
            .unwrap();
        ledger
    }

    fn run_add(ledger: &mut Ledger, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        add_loop(ledger, "19-06-01", &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_creates_a_new_account() {
        let mut ledger = Ledger::new();
        run_add(&mut ledger, "n\n7777\nIda Wells\nd\n100.00\nq\n");
        assert_eq!(ledger.holder_name("7777"), Some("Ida Wells"));
        assert_eq!(ledger.balance("7777"), dec!(100.00));
        assert_eq!(ledger.history("7777")[0].date, "19-06-01");
    }

    #[test]
    fn add_appends_to_an_existing_account() {
        let mut ledger = sample();
        // Roster is sorted by holder name, so 2) is Zoe Hart / 1234.
        run_add(&mut ledger, "2\nw\n30.00\nq\n");
        assert_eq!(ledger.balance("1234"), dec!(70.00));
        assert_eq!(ledger.holder_name("1234"), Some("Zoe Hart"));
    }

    #[test]
    fn add_reprompts_until_everything_validates() {
        let mut ledger = sample();
        let out = run_add(
            &mut ledger,
            "n\n42\n1234\n9876\nBea:Cole\nBea Cole\nx\nd\n-5\nten\n5.50\nq\n",
        );
        assert_eq!(ledger.balance("9876"), dec!(5.50));
        assert_eq!(ledger.holder_name("9876"), Some("Bea Cole"));
        assert!(out.contains("already exists or has an invalid length"));
        assert!(out.contains("may not contain"));
        assert!(out.contains("Invalid transaction type"));
        assert!(out.contains("non-negative decimal"));
    }

    #[test]
    fn quitting_mid_entry_commits_nothing() {
        let mut ledger = sample();
        run_add(&mut ledger, "n\n9876\nq\n");
        assert!(!ledger.contains("9876"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn end_of_input_acts_as_quit() {
        let mut ledger = sample();
        run_add(&mut ledger, "");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn bad_menu_choice_reprompts() {
        let mut ledger = sample();
        let out = run_add(&mut ledger, "9\n1\nd\n1.00\nq\n");
        assert!(out.contains("choice does not exist"));
        assert_eq!(ledger.balance("0042"), dec!(6.50));
    }

    #[test]
    fn info_shows_the_summary() {
        let ledger = sample();
        let mut input = "2\ny\nq\n".as_bytes();
        let mut out = Vec::new();
        info_loop(&ledger, &mut input, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1) Abe Ford 0042"));
        assert!(out.contains("2) Zoe Hart 1234"));
        assert!(out.contains("account #:  1234"));
        assert!(out.contains("balance:  $100.00"));
    }

    #[test]
    fn history_prints_date_ordered_lines() {
        let mut ledger = sample();
        ledger
            .append("1234", tx("Zoe Hart", "18-12-25", TxKind::Withdrawal, dec!(30.00)))
            .unwrap();
        let mut input = "2\nq\n".as_bytes();
        let mut out = Vec::new();
        history_loop(&ledger, &mut input, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let withdrawal = out.find("18-12-25 Withdrawal $30.00").unwrap();
        let deposit = out.find("19-01-01 Deposit $100.00").unwrap();
        assert!(withdrawal < deposit);
    }
}

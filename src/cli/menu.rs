//! Interactive console frontend
//!
//! Numbered menu over stdin/stdout, mirroring the command set of the loan
//! engine: lend (chosen or quick), return, report, submit request, fulfill
//! requests. Input and output are generic so the loop can be driven by
//! scripted readers in tests.
//!
//! Every command failure is printed and the loop continues; nothing here
//! terminates the process.

use crate::core::LibraryService;
use crate::types::BookRecord;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Run the menu loop until the user exits or input ends
///
/// Reads one command per iteration; an unparsable menu selection prints a
/// message and re-prompts. Command errors are reported and the loop keeps
/// going.
pub fn run<R: BufRead, W: Write>(
    service: &mut LibraryService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "===== UNIVERSITY LIBRARY SYSTEM =====")?;
        writeln!(output, "1. Lend a book (choose a title)")?;
        writeln!(output, "2. Quick lend (top of the pool)")?;
        writeln!(output, "3. Return a book")?;
        writeln!(output, "4. Generate loan report")?;
        writeln!(output, "5. Submit a purchase request")?;
        writeln!(output, "6. Fulfill pending requests")?;
        writeln!(output, "7. Exit")?;
        write!(output, "\nSelect an option: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let Ok(option) = line.trim().parse::<u32>() else {
            writeln!(output, "Please enter a valid number.")?;
            continue;
        };

        let today = Local::now().date_naive();
        match option {
            1 => lend_chosen(service, input, output, today)?,
            2 => quick_lend(service, input, output, today)?,
            3 => return_book(service, output, today)?,
            4 => generate_report(service, output, today)?,
            5 => submit_request(service, input, output)?,
            6 => fulfill_requests(service, output)?,
            7 => {
                writeln!(output, "Thank you for using the library system.")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
}

fn lend_chosen<R: BufRead, W: Write>(
    service: &mut LibraryService,
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> std::io::Result<()> {
    let listing: Vec<BookRecord> = service.available_books().to_vec();
    if listing.is_empty() {
        writeln!(output, "No books are available to lend.")?;
        return Ok(());
    }

    writeln!(output, "\n--- Available Books ---")?;
    for (i, book) in listing.iter().enumerate() {
        writeln!(output, "{}. {} ({})", i + 1, book.title, book.author)?;
    }

    let Some(selection) = prompt(input, output, "Select a book number: ")? else {
        return Ok(());
    };
    let chosen = selection
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| listing.get(i));
    let Some(book) = chosen else {
        writeln!(output, "Not a valid selection, lending cancelled.")?;
        return Ok(());
    };

    let Some(borrower) = prompt(input, output, "Borrower id: ")? else {
        return Ok(());
    };

    match service.lend(book, borrower.trim(), today) {
        Ok(loan) => writeln!(
            output,
            "LOAN: '{}' lent to {}.",
            loan.book.title, loan.borrower_id
        ),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn quick_lend<R: BufRead, W: Write>(
    service: &mut LibraryService,
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> std::io::Result<()> {
    let Some(borrower) = prompt(input, output, "Borrower id: ")? else {
        return Ok(());
    };

    match service.lend_next(borrower.trim(), today) {
        Ok(loan) => writeln!(
            output,
            "LOAN: '{}' lent to {}.",
            loan.book.title, loan.borrower_id
        ),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn return_book<W: Write>(
    service: &mut LibraryService,
    output: &mut W,
    today: NaiveDate,
) -> std::io::Result<()> {
    match service.return_loan(today) {
        Ok(receipt) => {
            writeln!(output, "RETURN: '{}' has been returned.", receipt.title)?;
            writeln!(output, "  - Days late: {}", receipt.days_late)?;
            writeln!(output, "  - Fine due: ${:.2}", receipt.fine)?;
            writeln!(output, "  - '{}' is available to lend again.", receipt.title)
        }
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn generate_report<W: Write>(
    service: &LibraryService,
    output: &mut W,
    today: NaiveDate,
) -> std::io::Result<()> {
    match service.generate_report(today) {
        Ok(outcome) => writeln!(
            output,
            "REPORT: {} loan(s) written to '{}'.",
            outcome.rows,
            outcome.path.display()
        ),
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

fn submit_request<R: BufRead, W: Write>(
    service: &LibraryService,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "\n--- Submit a Purchase Request ---")?;

    match read_request(input, output)? {
        Ok(record) => match service.submit_request(&record) {
            Ok(()) => writeln!(
                output,
                "REQUEST RECORDED: '{}' added to the request ledger.",
                record.title
            ),
            Err(e) => writeln!(output, "Error: {}", e),
        },
        Err(reason) => writeln!(output, "{} The request has been cancelled.", reason),
    }
}

fn fulfill_requests<W: Write>(
    service: &mut LibraryService,
    output: &mut W,
) -> std::io::Result<()> {
    match service.fulfill_requests() {
        Ok(summary) if summary.nothing_pending() => {
            writeln!(output, "No pending requests to fulfill.")
        }
        Ok(summary) => {
            if summary.duplicates > 0 {
                writeln!(
                    output,
                    "Skipped {} request(s) already in the catalog.",
                    summary.duplicates
                )?;
            }
            writeln!(
                output,
                "PURCHASE COMPLETE: {} new book(s) added to the catalog and available to lend.",
                summary.purchased
            )
        }
        Err(e) => writeln!(output, "Error: {}", e),
    }
}

/// Collect the fields of a new request from the console
///
/// Numeric and date fields are validated as they are read; the first bad
/// field cancels the whole request with an explanation.
fn read_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Result<BookRecord, String>> {
    macro_rules! field {
        ($label:expr) => {
            match prompt(input, output, $label)? {
                Some(value) => value.trim().to_string(),
                None => return Ok(Err("Input ended.".to_string())),
            }
        };
    }

    let id_text = field!("Book id: ");
    let Ok(id) = id_text.parse::<u32>() else {
        return Ok(Err(format!("'{}' is not a valid id.", id_text)));
    };

    let title = field!("Title: ");
    let author = field!("Author: ");
    let genre = field!("Genre: ");

    let date_text = field!("Publication date (YYYY-MM-DD): ");
    let Ok(published) = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d") else {
        return Ok(Err(format!("'{}' is not a valid date.", date_text)));
    };

    let publisher = field!("Publisher: ");

    let price_text = field!("Price: ");
    let Ok(price) = Decimal::from_str(&price_text) else {
        return Ok(Err(format!("'{}' is not a valid price.", price_text)));
    };

    Ok(Ok(BookRecord {
        id,
        title,
        author,
        genre,
        published,
        publisher,
        price,
    }))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;
    read_line(input)
}

/// Read one line, `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let bytes = input.read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
